//! Utility aliases, base shapes, and node/edge/vector interfaces.

use super::ast::{
    Declaration, TsInterface, TsLiteral, TsMember, TsPrimitive, TsProp, TsType, TsTypeAlias,
};
use super::mapper::{EdgeSide, TypeMapper};
use super::names;
use crate::config::{GeneratorConfig, IdRepresentation};
use crate::error::TypeMapError;
use helixgen_schema::{EdgeType, NodeType, SchemaField, SchemaModel, VectorType};

/// Generator for entity shapes.
pub struct ShapeGenerator<'a> {
    model: &'a SchemaModel,
    config: &'a GeneratorConfig,
    mapper: TypeMapper<'a>,
}

impl<'a> ShapeGenerator<'a> {
    /// Creates a new shape generator.
    #[must_use]
    pub fn new(model: &'a SchemaModel, config: &'a GeneratorConfig) -> Self {
        Self {
            model,
            config,
            mapper: TypeMapper::new(model),
        }
    }

    /// `Vector`, `Optional<T>` and `HelixID`.
    #[must_use]
    pub fn utility_types(&self) -> Vec<Declaration> {
        let id = match self.config.id_representation {
            IdRepresentation::BigInt => TsPrimitive::BigInt,
            IdRepresentation::String => TsPrimitive::String,
        };
        vec![
            alias(
                names::VECTOR,
                &[],
                TsType::Array(Box::new(TsType::Primitive(TsPrimitive::Number))),
            ),
            alias(
                names::OPTIONAL,
                &["T"],
                TsType::Union(vec![
                    TsType::named("T"),
                    TsType::Primitive(TsPrimitive::Null),
                    TsType::Primitive(TsPrimitive::Undefined),
                ]),
            ),
            alias(names::HELIX_ID, &[], TsType::Primitive(id)),
        ]
    }

    /// Aliases derived from the runtime client's `query` signature.
    #[must_use]
    pub fn runtime_types(&self) -> Vec<Declaration> {
        let client = TsType::named(self.config.client_import.as_str());
        let query = TsType::indexed(client.clone(), TsType::string_literal(names::QUERY_METHOD));
        vec![
            alias(names::CLIENT_ALIAS, &[], client),
            alias(
                names::RESPONSE,
                &[],
                TsType::generic(
                    "Awaited",
                    vec![TsType::generic("ReturnType", vec![query.clone()])],
                ),
            ),
            alias(
                names::INPUT,
                &[],
                TsType::indexed(
                    TsType::generic("Parameters", vec![query]),
                    TsType::Literal(TsLiteral::Int(1)),
                ),
            ),
        ]
    }

    /// `BaseNode`, `BaseVector` and `BaseEdge`.
    ///
    /// # Errors
    /// Returns `TypeMapError` if a base field fails to map.
    pub fn base_shapes(&self) -> Result<Vec<Declaration>, TypeMapError> {
        Ok(vec![
            self.base_shape(names::BASE_NODE, &NodeType::base_fields())?,
            self.base_shape(names::BASE_VECTOR, &VectorType::base_fields())?,
            self.base_shape(names::BASE_EDGE, &EdgeType::base_fields())?,
        ])
    }

    fn base_shape(&self, name: &str, fields: &[SchemaField]) -> Result<Declaration, TypeMapError> {
        let members = fields
            .iter()
            .map(|f| {
                self.mapper
                    .map_base_field(f)
                    .map(|m| TsMember::Property(m.into_prop(f.name.as_str())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Declaration::Interface(TsInterface {
            name: name.to_string(),
            extends: None,
            members,
            doc: Vec::new(),
        }))
    }

    /// One interface per node type, in declaration order.
    ///
    /// # Errors
    /// Returns `TypeMapError` if a field references an undeclared type.
    pub fn nodes(&self) -> Result<Vec<Declaration>, TypeMapError> {
        self.model.nodes().iter().map(|n| self.node(n)).collect()
    }

    fn node(&self, node: &NodeType) -> Result<Declaration, TypeMapError> {
        let mut members = vec![TsMember::Property(TsProp {
            name: "label".to_string(),
            ty: TsType::string_literal(node.label.as_str()),
            optional: false,
        })];
        members.extend(self.fields(&node.name, &node.fields)?);
        Ok(Declaration::Interface(TsInterface {
            name: node.name.clone(),
            extends: Some(names::BASE_NODE.to_string()),
            members,
            doc: Vec::new(),
        }))
    }

    /// One interface per edge type with full endpoint shapes.
    ///
    /// # Errors
    /// Returns `TypeMapError` if an endpoint is not a declared node or a
    /// field references an undeclared type.
    pub fn edges(&self) -> Result<Vec<Declaration>, TypeMapError> {
        self.model.edges().iter().map(|e| self.edge(e)).collect()
    }

    fn edge(&self, edge: &EdgeType) -> Result<Declaration, TypeMapError> {
        let mut members = Vec::with_capacity(edge.fields.len() + 2);
        for side in [EdgeSide::From, EdgeSide::To] {
            members.push(TsMember::Property(TsProp {
                name: side.field_name().to_string(),
                ty: self.mapper.map_endpoint(edge, side)?,
                optional: false,
            }));
        }
        members.extend(self.fields(&edge.name, &edge.fields)?);
        Ok(Declaration::Interface(TsInterface {
            name: edge.name.clone(),
            extends: Some(names::BASE_EDGE.to_string()),
            members,
            doc: vec![format!("`{}` -> `{}`", edge.from, edge.to)],
        }))
    }

    /// One interface per vector type.
    ///
    /// # Errors
    /// Returns `TypeMapError` if a field references an undeclared type.
    pub fn vectors(&self) -> Result<Vec<Declaration>, TypeMapError> {
        self.model.vectors().iter().map(|v| self.vector(v)).collect()
    }

    fn vector(&self, vector: &VectorType) -> Result<Declaration, TypeMapError> {
        let doc = vector
            .dimensions
            .map(|d| vec![format!("Embedding with {d} dimensions.")])
            .unwrap_or_default();
        Ok(Declaration::Interface(TsInterface {
            name: vector.name.clone(),
            extends: Some(names::BASE_VECTOR.to_string()),
            members: self.fields(&vector.name, &vector.fields)?,
            doc,
        }))
    }

    /// Closed union over the given interface names; `never` when empty.
    #[must_use]
    pub fn union<'n>(name: &str, members: impl Iterator<Item = &'n str>) -> Declaration {
        alias(
            name,
            &[],
            TsType::Union(members.map(TsType::named).collect()),
        )
    }

    fn fields(&self, owner: &str, fields: &[SchemaField]) -> Result<Vec<TsMember>, TypeMapError> {
        fields
            .iter()
            .map(|f| {
                self.mapper
                    .map_field(f, owner)
                    .map(|m| TsMember::Property(m.into_prop(f.name.as_str())))
            })
            .collect()
    }
}

pub(crate) fn alias(name: &str, type_params: &[&str], ty: TsType) -> Declaration {
    Declaration::TypeAlias(TsTypeAlias {
        name: name.to_string(),
        type_params: type_params.iter().map(|p| (*p).to_string()).collect(),
        ty,
        doc: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::emit::Emit;
    use helixgen_schema::parse_introspection;

    const SCHEMA: &str = r#"{
        "schema": {
            "nodes": [ { "name": "User", "properties": { "id": "ID", "name": "String", "nick": "String?" } } ],
            "vectors": [ { "name": "Doc", "dimensions": 3, "properties": { "title": "String" } } ],
            "edges": [ { "name": "Knows", "from": "User", "to": "User", "properties": { "since": "ID" } } ]
        }
    }"#;

    fn interface(decl: &Declaration) -> &TsInterface {
        decl.as_interface().expect("interface")
    }

    #[test]
    fn test_node_interface() {
        let model = parse_introspection(SCHEMA).expect("Failed to parse");
        let config = GeneratorConfig::default();
        let nodes = ShapeGenerator::new(&model, &config).nodes().expect("nodes");
        let user = interface(&nodes[0]);

        assert_eq!(user.extends.as_deref(), Some("BaseNode"));
        assert_eq!(user.property("label").expect("label").ty.emit(), "'User'");
        assert_eq!(user.property("name").expect("name").ty.emit(), "string");
        assert!(user.property("nick").expect("nick").optional);
        assert!(user.property("id").is_none());
    }

    #[test]
    fn test_edge_embeds_full_node() {
        let model = parse_introspection(SCHEMA).expect("Failed to parse");
        let config = GeneratorConfig::default();
        let edges = ShapeGenerator::new(&model, &config).edges().expect("edges");
        let knows = interface(&edges[0]);

        assert_eq!(knows.property("from").expect("from").ty, TsType::named("User"));
        assert_eq!(knows.property("to").expect("to").ty, TsType::named("User"));
        assert_eq!(knows.property("since").expect("since").ty.emit(), "HelixID");
    }

    #[test]
    fn test_vector_interface() {
        let model = parse_introspection(SCHEMA).expect("Failed to parse");
        let config = GeneratorConfig::default();
        let vectors = ShapeGenerator::new(&model, &config).vectors().expect("vectors");
        let doc = interface(&vectors[0]);
        assert_eq!(doc.extends.as_deref(), Some("BaseVector"));
        assert_eq!(doc.doc, ["Embedding with 3 dimensions."]);
    }

    #[test]
    fn test_utility_types_follow_id_representation() {
        let model = SchemaModel::new();
        let config = GeneratorConfig::default().with_id_representation(IdRepresentation::String);
        let decls = ShapeGenerator::new(&model, &config).utility_types();
        let Declaration::TypeAlias(id) = &decls[2] else {
            panic!("expected alias");
        };
        assert_eq!(id.name, "HelixID");
        assert_eq!(id.ty.emit(), "string");
    }

    #[test]
    fn test_runtime_types() {
        let model = SchemaModel::new();
        let config = GeneratorConfig::default();
        let decls = ShapeGenerator::new(&model, &config).runtime_types();
        let rendered: Vec<String> = decls
            .iter()
            .map(|d| match d {
                Declaration::TypeAlias(a) => a.ty.emit(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(
            rendered,
            [
                "HelixDB",
                "Awaited<ReturnType<HelixDB['query']>>",
                "Parameters<HelixDB['query']>[1]"
            ]
        );
    }

    #[test]
    fn test_empty_union_is_never() {
        let decl = ShapeGenerator::union("AnyEdge", std::iter::empty());
        let Declaration::TypeAlias(a) = decl else {
            panic!("expected alias");
        };
        assert_eq!(a.ty.emit(), "never");
    }

    #[test]
    fn test_base_shapes() {
        let model = SchemaModel::new();
        let config = GeneratorConfig::default();
        let bases = ShapeGenerator::new(&model, &config).base_shapes().expect("bases");
        let edge = interface(&bases[2]);
        assert_eq!(edge.name, "BaseEdge");
        assert!(edge.property("id").expect("id").optional);
        let node = interface(&bases[0]);
        assert!(!node.property("id").expect("id").optional);
        assert!(node.property("updated_at").expect("updated_at").optional);
    }
}
