//! Type guards and response helpers.

use super::ast::{
    BinOp, Declaration, TsExpr, TsFunction, TsParam, TsPrimitive, TsStmt, TsType,
};
use super::names;
use crate::config::GeneratorConfig;
use helixgen_schema::SchemaModel;

/// Name of the guard function for a type.
#[must_use]
pub fn guard_name(type_name: &str) -> String {
    format!("is{type_name}")
}

/// Generator for guards and `extractData`.
pub struct HelperGenerator<'a> {
    model: &'a SchemaModel,
    config: &'a GeneratorConfig,
}

impl<'a> HelperGenerator<'a> {
    /// Creates a new helper generator.
    #[must_use]
    pub const fn new(model: &'a SchemaModel, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// One guard per node type, then one per vector type.
    #[must_use]
    pub fn guards(&self) -> Vec<Declaration> {
        let nodes = self.model.nodes().iter().map(|n| {
            self.guard(
                &n.name,
                Some(&n.label),
                "Best-effort: checks `id` and `label` only, other fields are not validated.",
            )
        });
        let vectors = self.model.vectors().iter().map(|v| {
            self.guard(
                &v.name,
                None,
                "Best-effort: checks `id` only, other fields are not validated.",
            )
        });
        nodes.chain(vectors).collect()
    }

    fn guard(&self, type_name: &str, label: Option<&str>, doc: &str) -> Declaration {
        let obj = || TsExpr::ident("obj");

        let mut cond = obj()
            .type_of()
            .binary(BinOp::StrictEq, TsExpr::string("object"))
            .and(obj().binary(BinOp::StrictNotEq, TsExpr::Null))
            .and(obj().member("id").type_of().binary(
                BinOp::StrictEq,
                TsExpr::string(self.config.id_representation.ts_keyword()),
            ));
        if let Some(label) = label {
            cond = cond.and(
                obj()
                    .member("label")
                    .binary(BinOp::StrictEq, TsExpr::string(label)),
            );
        }

        Declaration::Function(TsFunction {
            name: guard_name(type_name),
            type_params: Vec::new(),
            params: vec![TsParam::typed("obj", TsType::Primitive(TsPrimitive::Any))],
            return_type: Some(TsType::Predicate {
                param: "obj".to_string(),
                ty: Box::new(TsType::named(type_name)),
            }),
            body: vec![TsStmt::Return(cond)],
            doc: vec![doc.to_string()],
        })
    }

    /// `extractData<T>(response, key?)`: an unchecked assertion.
    #[must_use]
    pub fn extract_data(&self) -> Declaration {
        let t = || TsType::named("T");
        let response = || TsExpr::ident("response");
        let record = TsType::generic(
            "Record",
            vec![
                TsType::Primitive(TsPrimitive::String),
                TsType::Primitive(TsPrimitive::Unknown),
            ],
        );

        let keyed = TsExpr::Index {
            object: Box::new(response().cast(record)),
            index: Box::new(TsExpr::ident("key")),
        }
        .cast(t());

        Declaration::Function(TsFunction {
            name: names::EXTRACT.to_string(),
            type_params: vec!["T".to_string()],
            params: vec![
                TsParam::typed("response", TsType::named(names::RESPONSE)),
                TsParam {
                    name: "key".to_string(),
                    ty: Some(TsType::Primitive(TsPrimitive::String)),
                    optional: true,
                },
            ],
            return_type: Some(t()),
            body: vec![
                TsStmt::If {
                    cond: TsExpr::ident("key")
                        .binary(BinOp::StrictNotEq, TsExpr::ident("undefined")),
                    then_body: vec![TsStmt::Return(keyed)],
                },
                TsStmt::Return(response().cast(t())),
            ],
            doc: vec![
                "Unchecked cast of a query response, or one of its keys, to `T`.".to_string(),
                "Nothing is validated at runtime; a wrong `T` surfaces later as a".to_string(),
                "type error at the use site.".to_string(),
                "Usage: const users = extractData<User[]>(response, 'users');".to_string(),
            ],
        })
    }
}
