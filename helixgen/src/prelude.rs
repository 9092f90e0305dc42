//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use helixgen::prelude::*;
//! ```

// Schema model
pub use helixgen_schema::{
    EdgeType, FieldType, NodeType, ParseError, QueryDefinition, ReturnShape, SchemaError,
    SchemaField, SchemaModel, TypeCategory, VectorType, parse_introspection, validate_model,
};

// Code generation
pub use helixgen_codegen::{
    CodegenError, EmitError, EndpointTable, Generator, GeneratorConfig, IdRepresentation,
    TypeMapError, generate_from_file, generate_from_json, generate_from_json_with,
};
