//! Query endpoint constants.
//!
//! Maps a stable SCREAMING_SNAKE_CASE key per stored query to the query's
//! wire name. Built once from a [`SchemaModel`] and never mutated; the
//! emitted `QueryEndpoints` object is rendered from it.

use crate::error::EmitError;
use helixgen_schema::SchemaModel;
use helixgen_schema::ir::to_screaming_snake_case;
use std::collections::HashMap;

/// One endpoint constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Constant key, e.g. `GET_USER_FRIENDS`.
    pub key: String,
    /// Query name sent on the wire, e.g. `GetUserFriends`.
    pub query: String,
}

/// Immutable key -> query name table in query declaration order.
#[derive(Debug, Clone, Default)]
pub struct EndpointTable {
    entries: Vec<Endpoint>,
    index: HashMap<String, usize>,
}

impl EndpointTable {
    /// Builds the table from every query in the model.
    ///
    /// # Errors
    /// Returns `EmitError::ConstantKeyCollision` if two queries derive the
    /// same key.
    pub fn from_model(model: &SchemaModel) -> Result<Self, EmitError> {
        let mut entries = Vec::with_capacity(model.queries().len());
        let mut index = HashMap::with_capacity(model.queries().len());

        for query in model.queries() {
            let key = to_screaming_snake_case(&query.name);
            if let Some(&existing) = index.get(&key) {
                let first: &Endpoint = &entries[existing];
                return Err(EmitError::ConstantKeyCollision {
                    key,
                    first: first.query.clone(),
                    second: query.name.clone(),
                });
            }
            index.insert(key.clone(), entries.len());
            entries.push(Endpoint {
                key,
                query: query.name.clone(),
            });
        }

        Ok(Self { entries, index })
    }

    /// Returns the query name for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].query.as_str())
    }

    /// Returns the key for a query name.
    #[must_use]
    pub fn key_for(&self, query: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.query == query)
            .map(|e| e.key.as_str())
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.entries.iter()
    }

    /// Number of endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no endpoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helixgen_schema::parse_introspection;

    #[test]
    fn test_table_from_model() {
        let model = parse_introspection(
            r#"{ "queries": [ { "name": "GetUserFriends" }, { "name": "addUser" } ] }"#,
        )
        .expect("Failed to parse");
        let table = EndpointTable::from_model(&model).expect("no collision");

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("GET_USER_FRIENDS"), Some("GetUserFriends"));
        assert_eq!(table.key_for("addUser"), Some("ADD_USER"));
        let keys: Vec<&str> = table.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["GET_USER_FRIENDS", "ADD_USER"]);
    }

    #[test]
    fn test_key_collision() {
        let model = parse_introspection(
            r#"{ "queries": [ { "name": "GetUser" }, { "name": "get_user" } ] }"#,
        )
        .expect("Failed to parse");
        let err = EndpointTable::from_model(&model).expect_err("must collide");
        assert!(matches!(
            err,
            EmitError::ConstantKeyCollision { ref key, ref first, ref second }
                if key == "GET_USER" && first == "GetUser" && second == "get_user"
        ));
    }

    #[test]
    fn test_empty_table() {
        let table = EndpointTable::from_model(&SchemaModel::new()).expect("empty");
        assert!(table.is_empty());
        assert_eq!(table.get("ANY"), None);
    }
}
