//! Error types for code generation.

use helixgen_schema::SchemaError;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Introspection payload parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] helixgen_schema::ParseError),

    /// Type mapping error.
    #[error("type mapping error: {0}")]
    TypeMap(#[from] TypeMapError),

    /// Emission error.
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for mapping schema types to TypeScript types.
#[derive(Debug, Error)]
pub enum TypeMapError {
    /// Reference to a name that is not declared in the model.
    #[error("unknown type '{type_name}' in '{owner}'")]
    UnresolvedReference {
        /// Type name.
        type_name: String,
        /// Field or endpoint holding the reference.
        owner: String,
    },

    /// Edge endpoint resolving to something other than a node.
    #[error("edge endpoint '{owner}' resolves to {category} '{type_name}', expected a node")]
    NotANode {
        /// Type name.
        type_name: String,
        /// Endpoint location.
        owner: String,
        /// Category the name resolves to.
        category: String,
    },
}

/// Error type for rendering declarations as TypeScript source.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Generated identifier is a TypeScript reserved word.
    #[error("'{name}' ({owner}) is a reserved word in TypeScript")]
    ReservedWord {
        /// Offending identifier.
        name: String,
        /// What the identifier was generated for.
        owner: String,
    },

    /// Generated identifier is not a valid TypeScript identifier.
    #[error("'{name}' ({owner}) is not a valid TypeScript identifier")]
    InvalidIdentifier {
        /// Offending identifier.
        name: String,
        /// What the identifier was generated for.
        owner: String,
    },

    /// Two generated names differ only by case (or are equal).
    #[error("generated name '{name}' ({owner}) collides with '{existing}' ({existing_owner})")]
    NameCollision {
        /// Second name.
        name: String,
        /// What the second name was generated for.
        owner: String,
        /// Name already claimed.
        existing: String,
        /// What the first name was generated for.
        existing_owner: String,
    },

    /// Two queries map to the same endpoint constant key.
    #[error("queries '{first}' and '{second}' both map to endpoint constant '{key}'")]
    ConstantKeyCollision {
        /// Constant key.
        key: String,
        /// First query.
        first: String,
        /// Second query.
        second: String,
    },
}

impl TypeMapError {
    /// Creates an unresolved reference error.
    pub fn unresolved(type_name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            type_name: type_name.into(),
            owner: owner.into(),
        }
    }
}

impl From<SchemaError> for TypeMapError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnresolvedReference { owner, name } => Self::UnresolvedReference {
                type_name: name,
                owner,
            },
            SchemaError::EndpointNotNode {
                owner,
                name,
                category,
            } => Self::NotANode {
                type_name: name,
                owner,
                category,
            },
        }
    }
}

impl EmitError {
    /// Creates a reserved word error.
    pub fn reserved(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::ReservedWord {
            name: name.into(),
            owner: owner.into(),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            name: name.into(),
            owner: owner.into(),
        }
    }
}
