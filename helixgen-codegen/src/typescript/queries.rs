//! Query parameter types, typed client interface, factory and endpoint
//! constants.

use super::ast::{
    Declaration, TsConstObject, TsExpr, TsFunction, TsInterface, TsLiteral, TsMember,
    TsMethodSig, TsParam, TsPrimitive, TsStmt, TsType,
};
use super::mapper::TypeMapper;
use super::names;
use super::shapes::alias;
use crate::config::GeneratorConfig;
use crate::endpoints::EndpointTable;
use crate::error::TypeMapError;
use helixgen_schema::ir::to_pascal_case;
use helixgen_schema::{QueryDefinition, ReturnShape, SchemaModel};

/// Name of the parameter interface for a query.
#[must_use]
pub fn params_name(query: &str) -> String {
    format!("{}Params", to_pascal_case(query))
}

/// Name of the result interface for a query with an object return shape.
#[must_use]
pub fn result_name(query: &str) -> String {
    format!("{}Result", to_pascal_case(query))
}

/// Generator for everything derived from stored queries.
pub struct QueryGenerator<'a> {
    model: &'a SchemaModel,
    config: &'a GeneratorConfig,
    endpoints: &'a EndpointTable,
    mapper: TypeMapper<'a>,
}

impl<'a> QueryGenerator<'a> {
    /// Creates a new query generator.
    #[must_use]
    pub fn new(
        model: &'a SchemaModel,
        config: &'a GeneratorConfig,
        endpoints: &'a EndpointTable,
    ) -> Self {
        Self {
            model,
            config,
            endpoints,
            mapper: TypeMapper::new(model),
        }
    }

    /// `<Query>Params` per query, followed by `<Query>Result` when the query
    /// declares an object result.
    ///
    /// # Errors
    /// Returns `TypeMapError` if a parameter or result field references an
    /// undeclared type.
    pub fn query_types(&self) -> Result<Vec<Declaration>, TypeMapError> {
        let mut decls = Vec::with_capacity(self.model.queries().len());
        for query in self.model.queries() {
            decls.push(Declaration::Interface(TsInterface {
                name: params_name(&query.name),
                extends: None,
                members: self.members(&query.name, &query.parameters)?,
                doc: Vec::new(),
            }));

            if let ReturnShape::Object(fields) = &query.returns {
                decls.push(Declaration::Interface(TsInterface {
                    name: result_name(&query.name),
                    extends: None,
                    members: self.members(&format!("{}.returns", query.name), fields)?,
                    doc: vec![format!("Result of `{}`.", query.name)],
                }));
            }
        }
        Ok(decls)
    }

    fn members(
        &self,
        owner: &str,
        fields: &[helixgen_schema::SchemaField],
    ) -> Result<Vec<TsMember>, TypeMapError> {
        fields
            .iter()
            .map(|f| {
                self.mapper
                    .map_field(f, owner)
                    .map(|m| TsMember::Property(m.into_prop(f.name.as_str())))
            })
            .collect()
    }

    /// Declared result type, or `None` when the query is opaque.
    ///
    /// # Errors
    /// Returns `TypeMapError` if the return type references an undeclared
    /// type.
    pub fn result_type(&self, query: &QueryDefinition) -> Result<Option<TsType>, TypeMapError> {
        match &query.returns {
            ReturnShape::Opaque { .. } => Ok(None),
            ReturnShape::Type(ty) => self
                .mapper
                .map_type(ty, &format!("{}.returns", query.name))
                .map(Some),
            ReturnShape::Object(_) => Ok(Some(TsType::named(result_name(&query.name)))),
        }
    }

    /// The `TypedHelixDBClient` interface.
    ///
    /// # Errors
    /// Returns `TypeMapError` if a return type references an undeclared type.
    pub fn client(&self) -> Result<Declaration, TypeMapError> {
        let members = if self.model.queries().is_empty() {
            vec![TsMember::Method(TsMethodSig {
                name: names::QUERY_METHOD.to_string(),
                params: fallback_params(),
                return_type: promise(TsType::named(names::RESPONSE)),
                doc: vec!["No stored queries were declared; calls are untyped.".to_string()],
            })]
        } else {
            self.model
                .queries()
                .iter()
                .map(|q| self.method(q).map(TsMember::Method))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Declaration::Interface(TsInterface {
            name: names::TYPED_CLIENT.to_string(),
            extends: None,
            members,
            doc: Vec::new(),
        }))
    }

    fn method(&self, query: &QueryDefinition) -> Result<TsMethodSig, TypeMapError> {
        let mut doc: Vec<String> = query
            .description
            .iter()
            .flat_map(|d| d.lines())
            .map(|l| l.trim().to_string())
            .collect();

        let return_type = match self.result_type(query)? {
            Some(ty) => ty,
            None => {
                if !doc.is_empty() {
                    doc.push(String::new());
                }
                doc.push("Untyped response: the schema declares no return shape.".to_string());
                if let ReturnShape::Opaque { bindings } = &query.returns {
                    if !bindings.is_empty() {
                        let list: Vec<String> = bindings.iter().map(|b| format!("`{b}`")).collect();
                        doc.push(format!("Returns {}.", list.join(", ")));
                    }
                }
                TsType::named(names::RESPONSE)
            }
        };

        Ok(TsMethodSig {
            name: query.name.clone(),
            params: vec![TsParam::typed("params", TsType::named(params_name(&query.name)))],
            return_type: promise(return_type),
            doc,
        })
    }

    /// `createTypedClient`, binding each method to `client.query(name, ..)`.
    ///
    /// # Errors
    /// Returns `TypeMapError` if a return type references an undeclared type.
    pub fn factory(&self) -> Result<Declaration, TypeMapError> {
        let client = || TsExpr::ident("client").member(names::QUERY_METHOD);

        let entries = if self.model.queries().is_empty() {
            vec![(
                names::QUERY_METHOD.to_string(),
                TsExpr::Arrow {
                    is_async: true,
                    params: fallback_params(),
                    body: Box::new(client().call(vec![
                        TsExpr::ident("endpoint"),
                        TsExpr::ident("params"),
                    ])),
                },
            )]
        } else {
            let mut entries = Vec::with_capacity(self.model.queries().len());
            for query in self.model.queries() {
                let call = client().call(vec![
                    TsExpr::string(query.name.as_str()),
                    TsExpr::ident("params"),
                ]);
                let body = match self.result_type(query)? {
                    Some(ty) => TsExpr::Await(Box::new(call))
                        .cast(TsType::Primitive(TsPrimitive::Unknown))
                        .cast(ty),
                    None => call,
                };
                entries.push((
                    query.name.clone(),
                    TsExpr::Arrow {
                        is_async: true,
                        params: vec![TsParam::inferred("params")],
                        body: Box::new(body),
                    },
                ));
            }
            entries
        };

        Ok(Declaration::Function(TsFunction {
            name: names::CREATE_CLIENT.to_string(),
            type_params: Vec::new(),
            params: vec![TsParam::typed(
                "client",
                TsType::named(self.config.client_import.as_str()),
            )],
            return_type: Some(TsType::named(names::TYPED_CLIENT)),
            body: vec![TsStmt::Return(TsExpr::Object(entries))],
            doc: vec![
                "Create a type-safe HelixDB client wrapper.".to_string(),
                "Usage:".to_string(),
                format!(
                    "  const typedClient = {}(new {}());",
                    names::CREATE_CLIENT,
                    self.config.client_import
                ),
            ],
        }))
    }

    /// `QueryEndpoints` constants and the `QueryEndpoint` literal union.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Declaration> {
        let entries = self
            .endpoints
            .iter()
            .map(|e| (e.key.clone(), TsLiteral::String(e.query.clone())))
            .collect();
        let table = TsType::TypeOf(names::ENDPOINTS.to_string());
        vec![
            Declaration::Const(TsConstObject {
                name: names::ENDPOINTS.to_string(),
                entries,
                doc: Vec::new(),
            }),
            alias(
                names::ENDPOINT,
                &[],
                TsType::indexed(table.clone(), TsType::KeyOf(Box::new(table))),
            ),
        ]
    }
}

fn promise(ty: TsType) -> TsType {
    TsType::generic("Promise", vec![ty])
}

fn fallback_params() -> Vec<TsParam> {
    vec![
        TsParam::typed("endpoint", TsType::Primitive(TsPrimitive::String)),
        TsParam::typed("params", TsType::named(names::INPUT)),
    ]
}
