//! Synthetic introspection payloads.

use serde_json::{Map, Value, json};

/// Size of a synthetic schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaSize {
    pub nodes: usize,
    pub edges: usize,
    pub vectors: usize,
    pub queries: usize,
    /// Properties per node, edge and vector.
    pub properties: usize,
}

impl SchemaSize {
    /// Tens of declarations.
    pub const SMALL: Self = Self {
        nodes: 8,
        edges: 8,
        vectors: 2,
        queries: 16,
        properties: 4,
    };

    /// Low hundreds of declarations.
    pub const LARGE: Self = Self {
        nodes: 100,
        edges: 150,
        vectors: 20,
        queries: 200,
        properties: 12,
    };
}

const PROPERTY_TYPES: [&str; 6] = ["String", "I64", "F64", "Boolean", "String?", "[String]"];

fn properties(count: usize) -> Value {
    let map: Map<String, Value> = (0..count)
        .map(|i| {
            (
                format!("prop_{i}"),
                json!(PROPERTY_TYPES[i % PROPERTY_TYPES.len()]),
            )
        })
        .collect();
    Value::Object(map)
}

/// Builds a payload in the server's nested layout.
///
/// Edges connect node `i % nodes` to node `(i + 1) % nodes`; every query
/// takes an identifier and a limit and every other query declares a result.
pub fn payload(size: SchemaSize) -> Value {
    let nodes: Vec<Value> = (0..size.nodes)
        .map(|i| json!({ "name": format!("Node{i}"), "properties": properties(size.properties) }))
        .collect();
    let node_count = size.nodes.max(1);
    let edges: Vec<Value> = (0..size.edges)
        .map(|i| {
            json!({
                "name": format!("Edge{i}"),
                "from": format!("Node{}", i % node_count),
                "to": format!("Node{}", (i + 1) % node_count),
                "properties": properties(size.properties / 2),
            })
        })
        .collect();
    let vectors: Vec<Value> = (0..size.vectors)
        .map(|i| {
            json!({
                "name": format!("Embedding{i}"),
                "dimensions": 384,
                "properties": properties(2),
            })
        })
        .collect();
    let queries: Vec<Value> = (0..size.queries)
        .map(|i| {
            let returns = if i % 2 == 0 {
                json!(format!("[Node{}]", i % node_count))
            } else {
                json!(["result"])
            };
            json!({
                "name": format!("Query{i}"),
                "parameters": { "id": "ID", "limit": "I32?" },
                "returns": returns,
            })
        })
        .collect();

    json!({
        "schema": { "nodes": nodes, "vectors": vectors, "edges": edges },
        "queries": queries,
    })
}

/// Same as [`payload`], serialized.
pub fn payload_string(size: SchemaSize) -> String {
    payload(size).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_payload_generates() {
        let model = helixgen_schema::parse_introspection(&payload_string(SchemaSize::SMALL))
            .expect("Failed to parse");
        assert_eq!(model.nodes().len(), 8);
        assert_eq!(model.queries().len(), 16);

        let source = helixgen_codegen::Generator::new(&model)
            .generate()
            .expect("Failed to generate");
        assert!(source.contains("export interface Node7 extends BaseNode {"));
        assert!(source.contains("Query0(params: Query0Params): Promise<Node0[]>;"));
    }
}
