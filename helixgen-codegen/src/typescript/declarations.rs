//! Ordered declaration set handed from the builder to the emitter.

use super::ast::{Declaration, TsImport, TsInterface};

/// Declaration groups in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    UtilityTypes,
    RuntimeTypes,
    BaseShapes,
    Nodes,
    NodeUnion,
    Edges,
    EdgeUnion,
    Vectors,
    QueryTypes,
    Client,
    Factory,
    Endpoints,
    Guards,
    Extraction,
}

impl GroupKind {
    /// Every group, in the order the emitter writes them.
    pub const ORDER: [Self; 14] = [
        Self::UtilityTypes,
        Self::RuntimeTypes,
        Self::BaseShapes,
        Self::Nodes,
        Self::NodeUnion,
        Self::Edges,
        Self::EdgeUnion,
        Self::Vectors,
        Self::QueryTypes,
        Self::Client,
        Self::Factory,
        Self::Endpoints,
        Self::Guards,
        Self::Extraction,
    ];

    /// Comment line written above the group.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::UtilityTypes => "Utility types",
            Self::RuntimeTypes => "HelixDB runtime types (derived from the client since not exported)",
            Self::BaseShapes => "Base shapes",
            Self::Nodes => "Node types",
            Self::NodeUnion => "Node union",
            Self::Edges => "Edge types",
            Self::EdgeUnion => "Edge union",
            Self::Vectors => "Vector types",
            Self::QueryTypes => "Query parameter and result types",
            Self::Client => "Client interface for type-safe HelixDB operations",
            Self::Factory => "Client factory",
            Self::Endpoints => "Query endpoint constants",
            Self::Guards => "Type guards (best-effort, see doc comments)",
            Self::Extraction => "Response helpers",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Declarations of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationGroup {
    pub kind: GroupKind,
    pub declarations: Vec<Declaration>,
}

/// Everything that goes into one generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSet {
    import: TsImport,
    groups: Vec<DeclarationGroup>,
}

impl DeclarationSet {
    /// Creates an empty set importing the runtime client.
    #[must_use]
    pub fn new(import: TsImport) -> Self {
        let groups = GroupKind::ORDER
            .iter()
            .map(|&kind| DeclarationGroup {
                kind,
                declarations: Vec::new(),
            })
            .collect();
        Self { import, groups }
    }

    /// Appends a declaration to a group.
    pub fn push(&mut self, kind: GroupKind, declaration: Declaration) {
        self.groups[kind.index()].declarations.push(declaration);
    }

    /// Runtime client import.
    #[must_use]
    pub fn import(&self) -> &TsImport {
        &self.import
    }

    /// Non-empty groups in emission order.
    pub fn groups(&self) -> impl Iterator<Item = &DeclarationGroup> {
        self.groups.iter().filter(|g| !g.declarations.is_empty())
    }

    /// Declarations of one group.
    #[must_use]
    pub fn group(&self, kind: GroupKind) -> &[Declaration] {
        &self.groups[kind.index()].declarations
    }

    /// All declarations in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.groups.iter().flat_map(|g| g.declarations.iter())
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.iter().find(|d| d.name() == name)
    }

    /// Looks up an interface by name.
    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&TsInterface> {
        self.get(name).and_then(Declaration::as_interface)
    }

    /// Total number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.declarations.len()).sum()
    }

    /// Returns true if the set holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::ast::{TsPrimitive, TsType, TsTypeAlias};

    fn alias(name: &str) -> Declaration {
        Declaration::TypeAlias(TsTypeAlias {
            name: name.to_string(),
            type_params: Vec::new(),
            ty: TsType::Primitive(TsPrimitive::Never),
            doc: Vec::new(),
        })
    }

    #[test]
    fn test_groups_follow_fixed_order() {
        let mut set = DeclarationSet::new(TsImport {
            default: "HelixDB".to_string(),
            from: "helix-ts".to_string(),
        });
        set.push(GroupKind::Guards, alias("Late"));
        set.push(GroupKind::BaseShapes, alias("Early"));

        let names: Vec<&str> = set.iter().map(Declaration::name).collect();
        assert_eq!(names, ["Early", "Late"]);
        assert_eq!(set.groups().count(), 2);
        assert_eq!(set.len(), 2);
        assert!(set.interface("Early").is_none());
        assert!(set.get("Late").is_some());
    }

    #[test]
    fn test_group_kind_order_matches_index() {
        for (i, kind) in GroupKind::ORDER.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
