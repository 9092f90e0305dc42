//! Schema model consumed by code generators.
//!
//! The model keeps declarations in payload order and offers name lookup
//! across all categories. It is built once per run and not mutated after
//! parsing completes, so generators may share it across threads.

use crate::types::{EdgeType, NodeType, QueryDefinition, VectorType};
use std::collections::HashMap;
use std::fmt;

/// Category of a named declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Node type.
    Node,
    /// Edge type.
    Edge,
    /// Vector type.
    Vector,
}

impl TypeCategory {
    /// Returns the lowercase category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Vector => "vector",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of the introspected schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    nodes: Vec<NodeType>,
    edges: Vec<EdgeType>,
    vectors: Vec<VectorType>,
    queries: Vec<QueryDefinition>,
    /// Name -> (category, index) for every node, edge and vector.
    type_map: HashMap<String, (TypeCategory, usize)>,
    query_map: HashMap<String, usize>,
}

impl SchemaModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node type. Returns the category already holding the name on
    /// conflict.
    pub fn add_node(&mut self, node: NodeType) -> Result<(), TypeCategory> {
        self.claim(&node.name, TypeCategory::Node, self.nodes.len())?;
        self.nodes.push(node);
        Ok(())
    }

    /// Adds an edge type. Returns the category already holding the name on
    /// conflict.
    pub fn add_edge(&mut self, edge: EdgeType) -> Result<(), TypeCategory> {
        self.claim(&edge.name, TypeCategory::Edge, self.edges.len())?;
        self.edges.push(edge);
        Ok(())
    }

    /// Adds a vector type. Returns the category already holding the name on
    /// conflict.
    pub fn add_vector(&mut self, vector: VectorType) -> Result<(), TypeCategory> {
        self.claim(&vector.name, TypeCategory::Vector, self.vectors.len())?;
        self.vectors.push(vector);
        Ok(())
    }

    /// Adds a query. Returns false if a query with the same name exists.
    pub fn add_query(&mut self, query: QueryDefinition) -> bool {
        if self.query_map.contains_key(&query.name) {
            return false;
        }
        self.query_map.insert(query.name.clone(), self.queries.len());
        self.queries.push(query);
        true
    }

    fn claim(
        &mut self,
        name: &str,
        category: TypeCategory,
        index: usize,
    ) -> Result<(), TypeCategory> {
        if let Some((existing, _)) = self.type_map.get(name) {
            return Err(*existing);
        }
        self.type_map.insert(name.to_string(), (category, index));
        Ok(())
    }

    /// Node types in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeType] {
        &self.nodes
    }

    /// Edge types in declaration order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeType] {
        &self.edges
    }

    /// Vector types in declaration order.
    #[must_use]
    pub fn vectors(&self) -> &[VectorType] {
        &self.vectors
    }

    /// Queries in declaration order.
    #[must_use]
    pub fn queries(&self) -> &[QueryDefinition] {
        &self.queries
    }

    /// Returns the category of a declared node, edge or vector name.
    #[must_use]
    pub fn category_of(&self, name: &str) -> Option<TypeCategory> {
        self.type_map.get(name).map(|(category, _)| *category)
    }

    /// Looks up a node type by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&NodeType> {
        match self.type_map.get(name) {
            Some((TypeCategory::Node, idx)) => self.nodes.get(*idx),
            _ => None,
        }
    }

    /// Looks up an edge type by name.
    #[must_use]
    pub fn edge(&self, name: &str) -> Option<&EdgeType> {
        match self.type_map.get(name) {
            Some((TypeCategory::Edge, idx)) => self.edges.get(*idx),
            _ => None,
        }
    }

    /// Looks up a vector type by name.
    #[must_use]
    pub fn vector(&self, name: &str) -> Option<&VectorType> {
        match self.type_map.get(name) {
            Some((TypeCategory::Vector, idx)) => self.vectors.get(*idx),
            _ => None,
        }
    }

    /// Looks up a query by name.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&QueryDefinition> {
        self.query_map.get(name).map(|&idx| &self.queries[idx])
    }

    /// Total number of node, edge and vector declarations.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.type_map.len()
    }
}

/// Converts a string to snake_case.
///
/// Runs of capitals stay together, so `HTTPServer` becomes `httpserver` and
/// `GetUserByID` becomes `get_user_by_id`.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_upper = true;
    for c in s.chars() {
        if c.is_uppercase() {
            if !prev_upper && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(c.to_lowercase());
            prev_upper = true;
        } else {
            if c == '-' {
                result.push('_');
            } else {
                result.push(c);
            }
            prev_upper = c == '_' || c == '-';
        }
    }
    result
}

/// Converts a string to SCREAMING_SNAKE_CASE.
#[must_use]
pub fn to_screaming_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SchemaField;

    fn node(name: &str) -> NodeType {
        NodeType {
            name: name.to_string(),
            label: name.to_string(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("GetUserFriends"), "get_user_friends");
        assert_eq!(to_snake_case("getUser"), "get_user");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
        assert_eq!(to_snake_case("GetUserByID"), "get_user_by_id");
        assert_eq!(to_snake_case("isAdmin"), "is_admin");
    }

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("GetUserFriends"), "GET_USER_FRIENDS");
        assert_eq!(to_screaming_snake_case("get_user"), "GET_USER");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("get_user"), "GetUser");
        assert_eq!(to_pascal_case("GetUserFriends"), "GetUserFriends");
        assert_eq!(to_pascal_case("create-post"), "CreatePost");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut model = SchemaModel::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            model.add_node(node(name)).expect("unique");
        }
        let names: Vec<&str> = model.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_cross_category_conflict() {
        let mut model = SchemaModel::new();
        model.add_node(node("Doc")).expect("unique");
        let conflict = model.add_vector(VectorType {
            name: "Doc".to_string(),
            dimensions: None,
            fields: Vec::new(),
        });
        assert_eq!(conflict, Err(TypeCategory::Node));
        assert_eq!(model.type_count(), 1);
    }

    #[test]
    fn test_lookup_by_category() {
        let mut model = SchemaModel::new();
        model.add_node(node("User")).expect("unique");
        model
            .add_edge(EdgeType {
                name: "Follows".to_string(),
                from: "User".to_string(),
                to: "User".to_string(),
                fields: vec![SchemaField::new("since", crate::types::FieldType::String)],
            })
            .expect("unique");

        assert!(model.node("User").is_some());
        assert!(model.node("Follows").is_none());
        assert!(model.edge("Follows").is_some());
        assert_eq!(model.category_of("Follows"), Some(TypeCategory::Edge));
        assert_eq!(model.category_of("Nope"), None);
    }

    #[test]
    fn test_duplicate_query_rejected() {
        let mut model = SchemaModel::new();
        assert!(model.add_query(QueryDefinition::new("GetUser", Vec::new())));
        assert!(!model.add_query(QueryDefinition::new("GetUser", Vec::new())));
        assert_eq!(model.queries().len(), 1);
        assert!(model.query("GetUser").is_some());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(TypeCategory::Vector.to_string(), "vector");
    }
}
