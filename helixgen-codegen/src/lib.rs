//! # helixgen Codegen
//!
//! TypeScript client binding generation from HelixDB schemas.
//!
//! This crate provides:
//! - Mapping of schema field types to TypeScript types
//! - Declaration building for shapes, unions, query parameters, the typed
//!   client interface, its factory, endpoint constants and guards
//! - Deterministic emission of the declarations as one TypeScript module

pub mod config;
pub mod endpoints;
pub mod error;
pub mod generator;
pub mod typescript;

pub use config::{GeneratorConfig, IdRepresentation};
pub use endpoints::{Endpoint, EndpointTable};
pub use error::{CodegenError, EmitError, TypeMapError};
pub use generator::Generator;

/// Generates TypeScript bindings from an introspection payload.
///
/// # Arguments
/// * `payload` - Introspection JSON
///
/// # Returns
/// Generated TypeScript module as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_json(payload: &str) -> Result<String, CodegenError> {
    generate_from_json_with(payload, &GeneratorConfig::default())
}

/// Generates TypeScript bindings with a custom configuration.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_json_with(
    payload: &str,
    config: &GeneratorConfig,
) -> Result<String, CodegenError> {
    let model = helixgen_schema::parse_introspection(payload)?;
    Generator::with_config(&model, config.clone()).generate()
}

/// Generates TypeScript bindings from an introspection payload file.
///
/// # Arguments
/// * `path` - Path to the JSON payload
///
/// # Returns
/// Generated TypeScript module as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let payload = std::fs::read_to_string(path)?;
    generate_from_json(&payload)
}
