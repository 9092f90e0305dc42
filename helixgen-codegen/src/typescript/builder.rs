//! Assembles the full declaration set from a schema model.

use super::ast::{Declaration, TsImport};
use super::declarations::{DeclarationSet, GroupKind};
use super::helpers::HelperGenerator;
use super::names;
use super::queries::QueryGenerator;
use super::shapes::ShapeGenerator;
use crate::config::GeneratorConfig;
use crate::endpoints::EndpointTable;
use crate::error::TypeMapError;
use helixgen_schema::SchemaModel;

/// Builds declarations group by group, in emission order.
pub struct DeclarationBuilder<'a> {
    model: &'a SchemaModel,
    config: &'a GeneratorConfig,
    endpoints: &'a EndpointTable,
}

impl<'a> DeclarationBuilder<'a> {
    /// Creates a builder over a validated model.
    #[must_use]
    pub const fn new(
        model: &'a SchemaModel,
        config: &'a GeneratorConfig,
        endpoints: &'a EndpointTable,
    ) -> Self {
        Self {
            model,
            config,
            endpoints,
        }
    }

    /// Builds every declaration of the generated module.
    ///
    /// # Errors
    /// Returns `TypeMapError` on the first type that cannot be mapped; no
    /// partial set is returned.
    pub fn build(&self) -> Result<DeclarationSet, TypeMapError> {
        let shapes = ShapeGenerator::new(self.model, self.config);
        let queries = QueryGenerator::new(self.model, self.config, self.endpoints);
        let helpers = HelperGenerator::new(self.model, self.config);

        let mut set = DeclarationSet::new(TsImport {
            default: self.config.client_import.clone(),
            from: self.config.client_module.clone(),
        });
        let mut push_all = |kind: GroupKind, decls: Vec<Declaration>| {
            for decl in decls {
                set.push(kind, decl);
            }
        };

        push_all(GroupKind::UtilityTypes, shapes.utility_types());
        push_all(GroupKind::RuntimeTypes, shapes.runtime_types());
        push_all(GroupKind::BaseShapes, shapes.base_shapes()?);

        push_all(GroupKind::Nodes, shapes.nodes()?);
        push_all(
            GroupKind::NodeUnion,
            vec![ShapeGenerator::union(
                names::ANY_NODE,
                self.model.nodes().iter().map(|n| n.name.as_str()),
            )],
        );

        push_all(GroupKind::Edges, shapes.edges()?);
        push_all(
            GroupKind::EdgeUnion,
            vec![ShapeGenerator::union(
                names::ANY_EDGE,
                self.model.edges().iter().map(|e| e.name.as_str()),
            )],
        );

        let mut vectors = shapes.vectors()?;
        vectors.push(ShapeGenerator::union(
            names::ANY_VECTOR,
            self.model.vectors().iter().map(|v| v.name.as_str()),
        ));
        push_all(GroupKind::Vectors, vectors);

        push_all(GroupKind::QueryTypes, queries.query_types()?);
        push_all(GroupKind::Client, vec![queries.client()?]);
        push_all(GroupKind::Factory, vec![queries.factory()?]);
        push_all(GroupKind::Endpoints, queries.endpoints());
        push_all(GroupKind::Guards, helpers.guards());
        push_all(GroupKind::Extraction, vec![helpers.extract_data()]);

        for query in self.model.queries().iter().filter(|q| q.returns.is_opaque()) {
            tracing::debug!(query = %query.name, "query has no declared return shape, using HelixDBResponse");
        }

        Ok(set)
    }
}
