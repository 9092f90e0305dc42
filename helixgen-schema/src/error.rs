//! Error types for payload parsing and schema validation.

use thiserror::Error;

/// Error type for introspection payload parsing.
///
/// Every structural variant carries the JSON path of the offending fragment,
/// e.g. `$.schema.nodes[2].properties.age`.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Payload is not well-formed JSON.
    #[error("JSON syntax error: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level key that is not one of the recognized shape categories.
    #[error("unknown schema category '{category}' at {path}")]
    UnknownCategory {
        /// Location of the key.
        path: String,
        /// Offending key.
        category: String,
    },

    /// Missing required key.
    #[error("missing required field '{field}' at {path}")]
    MissingField {
        /// Location of the enclosing object.
        path: String,
        /// Key name.
        field: String,
    },

    /// Value with the wrong JSON type.
    #[error("invalid value at {path}: expected {expected}, found {found}")]
    InvalidValue {
        /// Location of the value.
        path: String,
        /// Expected shape.
        expected: String,
        /// What was found instead.
        found: String,
    },

    /// Type expression that cannot be parsed.
    #[error("invalid type expression '{type_name}' at {path}")]
    InvalidType {
        /// Location of the type expression.
        path: String,
        /// Raw type expression.
        type_name: String,
    },

    /// Two declarations share a name.
    #[error("duplicate {kind} definition '{name}' at {path}")]
    DuplicateDefinition {
        /// Location of the second declaration.
        path: String,
        /// Kind of definition (node, edge, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Two fields of one shape share a name.
    #[error("duplicate field '{field}' at {path}")]
    DuplicateField {
        /// Location of the second field.
        path: String,
        /// Field name.
        field: String,
    },

    /// Field name reserved by the enclosing shape.
    #[error("field '{field}' at {path} is reserved")]
    ReservedField {
        /// Location of the field.
        path: String,
        /// Field name.
        field: String,
    },
}

/// Error type for schema validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Reference to a type that is not declared in the model.
    #[error("'{owner}' references undeclared type '{name}'")]
    UnresolvedReference {
        /// Declaration holding the reference (`Knows.from`, `GetUser.user_id`).
        owner: String,
        /// Referenced name.
        name: String,
    },

    /// Edge endpoint naming an edge or vector instead of a node.
    #[error("edge endpoint '{owner}' must reference a node type, '{name}' is a {category}")]
    EndpointNotNode {
        /// Endpoint location (`Knows.to`).
        owner: String,
        /// Referenced name.
        name: String,
        /// Category the name actually resolves to.
        category: String,
    },
}

impl ParseError {
    /// Creates a missing field error.
    pub fn missing(path: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an invalid type expression error.
    pub fn invalid_type(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::InvalidType {
            path: path.into(),
            type_name: type_name.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(
        path: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::DuplicateDefinition {
            path: path.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Returns the location of the offending fragment, if the error has one.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::UnknownCategory { path, .. }
            | Self::MissingField { path, .. }
            | Self::InvalidValue { path, .. }
            | Self::InvalidType { path, .. }
            | Self::DuplicateDefinition { path, .. }
            | Self::DuplicateField { path, .. }
            | Self::ReservedField { path, .. } => Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_path() {
        let err = ParseError::missing("$.nodes[0]", "name");
        assert_eq!(
            err.to_string(),
            "missing required field 'name' at $.nodes[0]"
        );
        assert_eq!(err.path(), Some("$.nodes[0]"));
    }

    #[test]
    fn test_json_error_has_no_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("must fail");
        let err = ParseError::from(json_err);
        assert!(err.path().is_none());
        assert!(err.to_string().starts_with("JSON syntax error"));
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::UnresolvedReference {
            owner: "Knows.from".to_string(),
            name: "Person".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'Knows.from' references undeclared type 'Person'"
        );
    }
}
