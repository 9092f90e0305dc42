//! Schema type definitions.
//!
//! This module contains the data structures representing the declarations of
//! an introspected HelixDB schema: fields and their logical types, nodes,
//! edges, vectors and stored queries.

/// Logical type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Entity identifier in the 64-bit range. Kept apart from `Integer` so
    /// generators can pick a representation that round-trips exactly.
    Identifier,
    /// Any signed or unsigned integer width.
    Integer,
    /// Floating point number.
    Float,
    /// Boolean.
    Boolean,
    /// UTF-8 string (dates are carried as strings).
    String,
    /// Embedding vector of numbers.
    Vector {
        /// Declared dimensionality, when the payload gives one.
        dimensions: Option<usize>,
    },
    /// Ordered collection of an element type.
    Array(Box<FieldType>),
    /// Reference to a declared node, edge or vector type by name.
    Reference(String),
    /// Value that may be absent or null.
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Parses a type expression as emitted by the introspection endpoint.
    ///
    /// Recognizes primitive names (`String`, `I32`, `F64`, `ID`, ...),
    /// `Vector<N>`, `Array(T)`, `[T]`, `Optional(T)`, `Option<T>` and a
    /// trailing `?`. Any other identifier is taken as a reference to a
    /// declared type and resolved later.
    ///
    /// Returns `None` for malformed expressions.
    #[must_use]
    pub fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        if expr.is_empty() {
            return None;
        }

        if let Some(inner) = expr.strip_suffix('?') {
            return Self::parse(inner).map(Self::optional);
        }
        if let Some(inner) = expr.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Self::parse(inner).map(|t| Self::Array(Box::new(t)));
        }
        if let Some(inner) = strip_wrapper(expr, "Array") {
            return Self::parse(inner).map(|t| Self::Array(Box::new(t)));
        }
        if let Some(inner) = strip_wrapper(expr, "Optional").or_else(|| strip_wrapper(expr, "Option"))
        {
            return Self::parse(inner).map(Self::optional);
        }
        if let Some(dims) = strip_wrapper(expr, "Vector") {
            let dimensions = dims.trim().parse::<usize>().ok()?;
            return Some(Self::Vector {
                dimensions: Some(dimensions),
            });
        }

        match expr {
            "String" | "Date" => Some(Self::String),
            "Boolean" | "Bool" => Some(Self::Boolean),
            "I8" | "I16" | "I32" | "I64" | "I128" | "U8" | "U16" | "U32" | "U64" | "U128" => {
                Some(Self::Integer)
            }
            "F32" | "F64" => Some(Self::Float),
            "ID" | "Uuid" => Some(Self::Identifier),
            "Vector" => Some(Self::Vector { dimensions: None }),
            name if is_type_name(name) => Some(Self::Reference(name.to_string())),
            _ => None,
        }
    }

    /// Wraps a type in `Optional`, collapsing nested optionals.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        match inner {
            Self::Optional(_) => inner,
            other => Self::Optional(Box::new(other)),
        }
    }

    /// Returns true if the type admits absence.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the referenced type name, looking through arrays and optionals.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Reference(name) => Some(name),
            Self::Array(inner) | Self::Optional(inner) => inner.reference(),
            _ => None,
        }
    }
}

/// Strips `Name(..)` or `Name<..>` and returns the inner expression.
fn strip_wrapper<'a>(expr: &'a str, name: &str) -> Option<&'a str> {
    let rest = expr.strip_prefix(name)?;
    rest.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .or_else(|| rest.strip_prefix('<').and_then(|s| s.strip_suffix('>')))
}

fn is_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Named field on a node, edge, vector, query parameter list or return shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Field name, unique within its owning shape.
    pub name: String,
    /// Logical type.
    pub ty: FieldType,
    /// Explicit nullability flag from the payload.
    pub nullable: bool,
    /// Implicit `created_at`/`updated_at` metadata.
    pub timestamp: bool,
}

impl SchemaField {
    /// Creates a non-nullable field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            timestamp: false,
        }
    }

    /// Creates a required identifier field.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Identifier)
    }

    /// Creates an optional timestamp metadata field.
    #[must_use]
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self {
            timestamp: true,
            ..Self::new(name, FieldType::optional(FieldType::Integer))
        }
    }

    /// Marks the field as nullable.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Returns true if the field may be null or absent.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.nullable || self.ty.is_optional()
    }
}

/// Node type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeType {
    /// Type name.
    pub name: String,
    /// Label string distinguishing instances at runtime.
    pub label: String,
    /// Own fields in declaration order, excluding the implicit base fields.
    pub fields: Vec<SchemaField>,
}

impl NodeType {
    /// Property names covered by the node base shape.
    pub const IMPLICIT_FIELDS: [&'static str; 4] = ["id", "label", "created_at", "updated_at"];

    /// Fields shared by every node: identifier plus optional timestamps.
    #[must_use]
    pub fn base_fields() -> Vec<SchemaField> {
        vec![
            SchemaField::identifier("id"),
            SchemaField::timestamp("created_at"),
            SchemaField::timestamp("updated_at"),
        ]
    }
}

/// Edge type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeType {
    /// Type name.
    pub name: String,
    /// Source node type name.
    pub from: String,
    /// Target node type name.
    pub to: String,
    /// Own fields in declaration order.
    pub fields: Vec<SchemaField>,
}

impl EdgeType {
    /// Property names covered by the edge base shape.
    pub const IMPLICIT_FIELDS: [&'static str; 2] = ["id", "created_at"];
    /// Property names taken by the endpoint fields.
    pub const ENDPOINT_FIELDS: [&'static str; 2] = ["from", "to"];

    /// Fields shared by every edge. Edges may be identifier-less.
    #[must_use]
    pub fn base_fields() -> Vec<SchemaField> {
        vec![
            SchemaField::identifier("id").with_nullable(true),
            SchemaField::timestamp("created_at"),
        ]
    }
}

/// Vector type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorType {
    /// Type name.
    pub name: String,
    /// Embedding dimensionality, when known.
    pub dimensions: Option<usize>,
    /// Own fields in declaration order.
    pub fields: Vec<SchemaField>,
}

impl VectorType {
    /// Property names covered by the vector base shape.
    pub const IMPLICIT_FIELDS: [&'static str; 1] = ["id"];

    /// Fields shared by every vector: identifier only.
    #[must_use]
    pub fn base_fields() -> Vec<SchemaField> {
        vec![SchemaField::identifier("id")]
    }
}

/// What the introspection source says about a query's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// No type information. Binding names, if listed, are kept for docs.
    Opaque {
        /// Names of the values the query returns.
        bindings: Vec<String>,
    },
    /// Result is a single value of this type.
    Type(FieldType),
    /// Result is an object with these fields.
    Object(Vec<SchemaField>),
}

impl ReturnShape {
    /// Returns true if the result shape is unknown.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque { .. })
    }
}

impl Default for ReturnShape {
    fn default() -> Self {
        Self::Opaque {
            bindings: Vec::new(),
        }
    }
}

/// Stored query declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDefinition {
    /// Query name, used verbatim as method name and endpoint string.
    pub name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<SchemaField>,
    /// Result shape.
    pub returns: ReturnShape,
    /// Free-form description.
    pub description: Option<String>,
}

impl QueryDefinition {
    /// Creates a query with an opaque result.
    #[must_use]
    pub fn new(name: impl Into<String>, parameters: Vec<SchemaField>) -> Self {
        Self {
            name: name.into(),
            parameters,
            returns: ReturnShape::default(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!(FieldType::parse("String"), Some(FieldType::String));
        assert_eq!(FieldType::parse("I32"), Some(FieldType::Integer));
        assert_eq!(FieldType::parse("U128"), Some(FieldType::Integer));
        assert_eq!(FieldType::parse("F64"), Some(FieldType::Float));
        assert_eq!(FieldType::parse("Boolean"), Some(FieldType::Boolean));
        assert_eq!(FieldType::parse("ID"), Some(FieldType::Identifier));
        assert_eq!(FieldType::parse("Date"), Some(FieldType::String));
    }

    #[test]
    fn test_identifier_distinct_from_integer() {
        assert_ne!(FieldType::parse("ID"), FieldType::parse("I64"));
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(
            FieldType::parse("Vector<1536>"),
            Some(FieldType::Vector {
                dimensions: Some(1536)
            })
        );
        assert_eq!(
            FieldType::parse("Vector"),
            Some(FieldType::Vector { dimensions: None })
        );
        assert_eq!(FieldType::parse("Vector<abc>"), None);
    }

    #[test]
    fn test_parse_wrappers() {
        assert_eq!(
            FieldType::parse("Array(String)"),
            Some(FieldType::Array(Box::new(FieldType::String)))
        );
        assert_eq!(
            FieldType::parse("[User]"),
            Some(FieldType::Array(Box::new(FieldType::Reference(
                "User".to_string()
            ))))
        );
        assert_eq!(
            FieldType::parse("Option<I32>"),
            Some(FieldType::Optional(Box::new(FieldType::Integer)))
        );
        assert_eq!(
            FieldType::parse("String?"),
            Some(FieldType::Optional(Box::new(FieldType::String)))
        );
    }

    #[test]
    fn test_nested_optional_collapses() {
        assert_eq!(
            FieldType::parse("Optional(String)?"),
            Some(FieldType::Optional(Box::new(FieldType::String)))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(FieldType::parse(""), None);
        assert_eq!(FieldType::parse("Array(String"), None);
        assert_eq!(FieldType::parse("not a type"), None);
        assert_eq!(FieldType::parse("[]"), None);
    }

    #[test]
    fn test_reference_lookthrough() {
        let ty = FieldType::parse("Optional([Post])").expect("valid type");
        assert_eq!(ty.reference(), Some("Post"));
        assert_eq!(FieldType::Integer.reference(), None);
    }

    #[test]
    fn test_field_optionality() {
        assert!(!SchemaField::identifier("id").is_optional());
        assert!(SchemaField::identifier("id").with_nullable(true).is_optional());
        let ts = SchemaField::timestamp("created_at");
        assert!(ts.timestamp);
        assert!(ts.is_optional());
    }

    #[test]
    fn test_base_fields() {
        let node = NodeType::base_fields();
        assert_eq!(node.len(), 3);
        assert!(!node[0].is_optional());

        let edge = EdgeType::base_fields();
        assert!(edge[0].is_optional());

        let vector = VectorType::base_fields();
        assert_eq!(vector.len(), 1);
        assert!(!vector[0].timestamp);
    }

    #[test]
    fn test_default_return_shape_is_opaque() {
        let query = QueryDefinition::new("GetUser", Vec::new());
        assert!(query.returns.is_opaque());
    }
}
