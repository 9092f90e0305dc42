//! # helixgen
//!
//! Typed TypeScript client generation for HelixDB.
//!
//! helixgen reads the schema a HelixDB instance reports on its `/introspect`
//! endpoint and emits one TypeScript module with:
//!
//! - **Entity shapes** - an interface per node, edge and vector type, edges
//!   embedding their full endpoint node shapes
//! - **Closed unions** - `AnyNode`, `AnyEdge`, `AnyVector`
//! - **Typed queries** - a `<Query>Params` interface per stored query and a
//!   `TypedHelixDBClient` interface with one method per query
//! - **Client factory** - `createTypedClient`, binding every method to the
//!   runtime client's `query(name, params)`
//! - **Helpers** - endpoint constants, best-effort type guards and an
//!   unchecked `extractData` assertion
//!
//! ## Quick Start
//!
//! ```ignore
//! use helixgen::prelude::*;
//!
//! let model = parse_introspection(&payload)?;
//! let source = Generator::new(&model).generate()?;
//! std::fs::write("helix-client.ts", source)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Introspection parsing, schema model and validation
//! - [`codegen`] - Type mapping, declaration building and emission

pub mod prelude;

/// Introspection parsing and the schema model.
pub mod schema {
    pub use helixgen_schema::*;
}

/// TypeScript code generation.
pub mod codegen {
    pub use helixgen_codegen::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_prelude_pipeline() {
        let model = parse_introspection(r#"{ "nodes": [ { "name": "User" } ] }"#)
            .expect("Failed to parse");
        validate_model(&model).expect("Failed to validate");
        let source = Generator::with_config(&model, GeneratorConfig::default())
            .generate()
            .expect("Failed to generate");
        assert!(source.starts_with("// Generated TypeScript types for HelixDB schema\n"));
    }
}
