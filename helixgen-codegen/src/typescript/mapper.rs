//! Mapping from schema field types to TypeScript types.

use super::ast::{TsPrimitive, TsProp, TsType};
use super::names;
use crate::error::TypeMapError;
use helixgen_schema::{EdgeType, FieldType, SchemaField, SchemaModel, TypeCategory};

/// Which end of an edge is being mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    From,
    To,
}

impl EdgeSide {
    /// Property name of this endpoint.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
        }
    }
}

/// Result of mapping one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// TypeScript type of the value.
    pub ty: TsType,
    /// The property may be absent or null.
    pub optional: bool,
}

impl MappedType {
    /// Returns true if callers must always supply a value.
    #[must_use]
    pub const fn requires_value(&self) -> bool {
        !self.optional
    }

    /// Turns the mapping into an interface property.
    #[must_use]
    pub fn into_prop(self, name: impl Into<String>) -> TsProp {
        TsProp {
            name: name.into(),
            ty: self.ty,
            optional: self.optional,
        }
    }
}

/// Maps field types against a schema model.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    model: &'a SchemaModel,
}

impl<'a> TypeMapper<'a> {
    /// Creates a mapper resolving references in `model`.
    #[must_use]
    pub const fn new(model: &'a SchemaModel) -> Self {
        Self { model }
    }

    /// Maps a declared field.
    ///
    /// Optional fields become `Optional<T>` with a `?` marker, so a value
    /// can be present, explicitly `null`, or absent.
    ///
    /// # Errors
    /// Returns `TypeMapError` if the type references an undeclared name.
    pub fn map_field(&self, field: &SchemaField, owner: &str) -> Result<MappedType, TypeMapError> {
        let owner = format!("{owner}.{}", field.name);
        let inner = strip_optional(&field.ty);
        let ty = self.map_type(inner, &owner)?;
        if field.is_optional() {
            Ok(MappedType {
                ty: TsType::generic(names::OPTIONAL, vec![ty]),
                optional: true,
            })
        } else {
            Ok(MappedType {
                ty,
                optional: false,
            })
        }
    }

    /// Maps a base shape field: plain type, `?` when optional.
    ///
    /// # Errors
    /// Returns `TypeMapError` if the type references an undeclared name.
    pub fn map_base_field(&self, field: &SchemaField) -> Result<MappedType, TypeMapError> {
        Ok(MappedType {
            ty: self.map_type(strip_optional(&field.ty), &field.name)?,
            optional: field.is_optional(),
        })
    }

    /// Maps a logical type.
    ///
    /// # Errors
    /// Returns `TypeMapError` if the type references an undeclared name.
    pub fn map_type(&self, ty: &FieldType, owner: &str) -> Result<TsType, TypeMapError> {
        Ok(match ty {
            FieldType::Identifier => TsType::named(names::HELIX_ID),
            FieldType::Integer | FieldType::Float => TsType::Primitive(TsPrimitive::Number),
            FieldType::Boolean => TsType::Primitive(TsPrimitive::Boolean),
            FieldType::String => TsType::Primitive(TsPrimitive::String),
            FieldType::Vector { .. } => TsType::named(names::VECTOR),
            FieldType::Array(inner) => TsType::Array(Box::new(self.map_type(inner, owner)?)),
            FieldType::Reference(name) => {
                if self.model.category_of(name).is_none() {
                    return Err(TypeMapError::unresolved(name.as_str(), owner));
                }
                TsType::named(name.as_str())
            }
            FieldType::Optional(inner) => {
                TsType::generic(names::OPTIONAL, vec![self.map_type(inner, owner)?])
            }
        })
    }

    /// Maps an edge endpoint to the full node interface it references.
    ///
    /// # Errors
    /// Returns `TypeMapError` if the endpoint is undeclared or not a node.
    pub fn map_endpoint(&self, edge: &EdgeType, side: EdgeSide) -> Result<TsType, TypeMapError> {
        let target = match side {
            EdgeSide::From => &edge.from,
            EdgeSide::To => &edge.to,
        };
        let owner = format!("{}.{}", edge.name, side.field_name());
        match self.model.category_of(target) {
            Some(TypeCategory::Node) => Ok(TsType::named(target.as_str())),
            Some(other) => Err(TypeMapError::NotANode {
                type_name: target.clone(),
                owner,
                category: other.to_string(),
            }),
            None => Err(TypeMapError::unresolved(target.as_str(), owner)),
        }
    }
}

fn strip_optional(ty: &FieldType) -> &FieldType {
    match ty {
        FieldType::Optional(inner) => strip_optional(inner),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::emit::Emit;
    use helixgen_schema::parse_introspection;

    fn model() -> SchemaModel {
        parse_introspection(
            r#"{
                "nodes": [ { "name": "User" } ],
                "vectors": [ { "name": "Doc" } ],
                "edges": [
                    { "name": "Knows", "from": "User", "to": "User" },
                    { "name": "Cites", "from": "User", "to": "Doc" }
                ]
            }"#,
        )
        .expect("Failed to parse")
    }

    fn emit(mapper: &TypeMapper<'_>, expr: &str) -> String {
        let ty = FieldType::parse(expr).expect("valid type");
        mapper.map_type(&ty, "T.f").expect("mapped").emit()
    }

    #[test]
    fn test_map_primitives() {
        let model = model();
        let mapper = TypeMapper::new(&model);
        assert_eq!(emit(&mapper, "String"), "string");
        assert_eq!(emit(&mapper, "I64"), "number");
        assert_eq!(emit(&mapper, "F32"), "number");
        assert_eq!(emit(&mapper, "Boolean"), "boolean");
        assert_eq!(emit(&mapper, "ID"), "HelixID");
        assert_eq!(emit(&mapper, "Vector<768>"), "Vector");
        assert_eq!(emit(&mapper, "[User]"), "User[]");
        assert_eq!(emit(&mapper, "Array(Doc)"), "Doc[]");
    }

    #[test]
    fn test_map_optional_field() {
        let model = model();
        let mapper = TypeMapper::new(&model);
        let field = SchemaField::new("nick", FieldType::optional(FieldType::String));
        let mapped = mapper.map_field(&field, "User").expect("mapped");
        assert!(mapped.optional);
        assert!(!mapped.requires_value());
        assert_eq!(mapped.clone().into_prop("nick").emit(), "nick?: Optional<string>");

        let nullable = SchemaField::new("age", FieldType::Integer).with_nullable(true);
        let mapped = mapper.map_field(&nullable, "User").expect("mapped");
        assert_eq!(mapped.ty.emit(), "Optional<number>");
    }

    #[test]
    fn test_map_base_field() {
        let model = model();
        let mapper = TypeMapper::new(&model);
        let mapped = mapper
            .map_base_field(&SchemaField::timestamp("created_at"))
            .expect("mapped");
        assert_eq!(mapped.into_prop("created_at").emit(), "created_at?: number");
    }

    #[test]
    fn test_unresolved_reference() {
        let model = model();
        let mapper = TypeMapper::new(&model);
        let field = SchemaField::new("owner", FieldType::Reference("Ghost".to_string()));
        let err = mapper.map_field(&field, "Post").expect_err("must fail");
        assert!(matches!(
            err,
            TypeMapError::UnresolvedReference { ref type_name, ref owner } if type_name == "Ghost" && owner == "Post.owner"
        ));
    }

    #[test]
    fn test_map_endpoint() {
        let model = model();
        let mapper = TypeMapper::new(&model);
        let knows = model.edge("Knows").expect("edge");
        assert_eq!(
            mapper.map_endpoint(knows, EdgeSide::To).expect("node"),
            TsType::named("User")
        );

        let cites = model.edge("Cites").expect("edge");
        let err = mapper.map_endpoint(cites, EdgeSide::To).expect_err("not a node");
        assert!(matches!(err, TypeMapError::NotANode { ref category, .. } if category == "vector"));
    }
}
