//! Generator configuration.

use std::fmt;
use std::str::FromStr;

/// TypeScript representation of identifier fields.
///
/// Both choices round-trip 64-bit identifiers exactly; `number` is not
/// offered because it loses precision above 2^53.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdRepresentation {
    /// `bigint`.
    #[default]
    BigInt,
    /// Decimal `string`.
    String,
}

impl IdRepresentation {
    /// Returns the TypeScript type keyword.
    #[must_use]
    pub const fn ts_keyword(self) -> &'static str {
        match self {
            Self::BigInt => "bigint",
            Self::String => "string",
        }
    }
}

impl fmt::Display for IdRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ts_keyword())
    }
}

impl FromStr for IdRepresentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bigint" => Ok(Self::BigInt),
            "string" => Ok(Self::String),
            other => Err(format!(
                "unknown id representation '{other}', expected 'bigint' or 'string'"
            )),
        }
    }
}

/// Options controlling the generated TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Module the runtime client is imported from.
    pub client_module: String,
    /// Default-import name of the runtime client class.
    pub client_import: String,
    /// Representation of identifier fields.
    pub id_representation: IdRepresentation,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Where the schema came from, for the header comment.
    pub source_note: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            client_module: "helix-ts".to_string(),
            client_import: "HelixDB".to_string(),
            id_representation: IdRepresentation::default(),
            indent: 2,
            source_note: "introspection endpoint".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module the runtime client is imported from.
    #[must_use]
    pub fn with_client_module(mut self, module: impl Into<String>) -> Self {
        self.client_module = module.into();
        self
    }

    /// Sets the default-import name of the runtime client.
    #[must_use]
    pub fn with_client_import(mut self, name: impl Into<String>) -> Self {
        self.client_import = name.into();
        self
    }

    /// Sets the identifier representation.
    #[must_use]
    pub const fn with_id_representation(mut self, repr: IdRepresentation) -> Self {
        self.id_representation = repr;
        self
    }

    /// Sets the indentation width (minimum 1).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the header note naming the schema source.
    #[must_use]
    pub fn with_source_note(mut self, note: impl Into<String>) -> Self {
        self.source_note = note.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.client_module, "helix-ts");
        assert_eq!(config.client_import, "HelixDB");
        assert_eq!(config.id_representation, IdRepresentation::BigInt);
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_builder_methods() {
        let config = GeneratorConfig::new()
            .with_client_module("@acme/helix")
            .with_id_representation(IdRepresentation::String)
            .with_indent(0);
        assert_eq!(config.client_module, "@acme/helix");
        assert_eq!(config.id_representation.ts_keyword(), "string");
        assert_eq!(config.indent, 1);
    }

    #[test]
    fn test_id_representation_from_str() {
        assert_eq!("BigInt".parse(), Ok(IdRepresentation::BigInt));
        assert_eq!("string".parse(), Ok(IdRepresentation::String));
        assert!("number".parse::<IdRepresentation>().is_err());
    }
}
