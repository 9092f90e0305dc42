//! # helixgen Schema
//!
//! HelixDB introspection payload parser and schema model.
//!
//! This crate provides:
//! - Parsing of `/introspect` payloads into a language-neutral schema model
//! - Type definitions for node, edge, vector and query declarations
//! - Reference validation across the whole model
//! - Naming helpers shared by code generators

pub mod error;
pub mod ir;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{SchemaModel, TypeCategory};
pub use parser::parse_introspection;
pub use types::{
    EdgeType, FieldType, NodeType, QueryDefinition, ReturnShape, SchemaField, VectorType,
};
pub use validation::validate_model;
