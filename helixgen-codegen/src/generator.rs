//! Main code generator.

use crate::config::GeneratorConfig;
use crate::endpoints::EndpointTable;
use crate::error::{CodegenError, TypeMapError};
use crate::typescript::{DeclarationBuilder, DeclarationSet, Emitter};
use helixgen_schema::{SchemaModel, validate_model};

/// TypeScript binding generator over one schema model.
///
/// The model is only borrowed, so several generators (for instance with
/// different configurations) may run against it concurrently.
pub struct Generator<'a> {
    model: &'a SchemaModel,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new(model: &'a SchemaModel) -> Self {
        Self::with_config(model, GeneratorConfig::default())
    }

    /// Creates a generator with a custom configuration.
    #[must_use]
    pub fn with_config(model: &'a SchemaModel, config: GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the endpoint constants table.
    ///
    /// # Errors
    /// Returns `CodegenError::Emit` if two queries share a constant key.
    pub fn endpoints(&self) -> Result<EndpointTable, CodegenError> {
        Ok(EndpointTable::from_model(self.model)?)
    }

    /// Validates the model and builds the declaration set.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reference is dangling, a type cannot be
    /// mapped, or endpoint keys collide.
    pub fn build(&self) -> Result<DeclarationSet, CodegenError> {
        validate_model(self.model).map_err(TypeMapError::from)?;
        let endpoints = self.endpoints()?;
        let set = DeclarationBuilder::new(self.model, &self.config, &endpoints).build()?;

        tracing::debug!(
            declarations = set.len(),
            nodes = self.model.nodes().len(),
            edges = self.model.edges().len(),
            vectors = self.model.vectors().len(),
            queries = self.model.queries().len(),
            "built declaration set"
        );

        Ok(set)
    }

    /// Generates the complete TypeScript module.
    ///
    /// # Returns
    /// The module source, ending with a single newline.
    ///
    /// # Errors
    /// Returns `CodegenError` on any validation, mapping or emission
    /// failure. No partial output is produced.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let set = self.build()?;
        let source = Emitter::new(&self.config).emit(&set)?;
        tracing::debug!(bytes = source.len(), "emitted TypeScript module");
        Ok(source)
    }
}
