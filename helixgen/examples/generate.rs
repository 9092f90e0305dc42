//! Generates TypeScript bindings for a small social graph schema.
//!
//! Run with: `cargo run --example generate`
//!
//! Pass a path to write the module to a file instead of stdout:
//! `cargo run --example generate -- helix-client.ts`

use helixgen::prelude::*;

const SCHEMA: &str = r#"{
    "schema": {
        "nodes": [
            { "name": "User", "properties": { "name": "String", "age": "U8", "email": "String?" } },
            { "name": "Post", "properties": { "title": "String", "tags": "[String]" } }
        ],
        "vectors": [
            { "name": "PostEmbedding", "dimensions": 384, "properties": { "model": "String" } }
        ],
        "edges": [
            { "name": "Follows", "from": "User", "to": "User", "properties": { "since": "Date" } },
            { "name": "Wrote", "from": "User", "to": "Post" }
        ]
    },
    "queries": [
        { "name": "GetUser", "parameters": { "user_id": "ID" }, "returns": "User" },
        {
            "name": "GetFeed",
            "parameters": { "user_id": "ID", "limit": "I32?" },
            "returns": { "posts": "[Post]", "authors": "[User]" },
            "description": "Latest posts from followed users"
        },
        { "name": "SearchPosts", "parameters": { "query": "Vector<384>" }, "returns": ["posts"] }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let model = parse_introspection(SCHEMA)?;
    println!(
        "// {} nodes, {} edges, {} vectors, {} queries",
        model.nodes().len(),
        model.edges().len(),
        model.vectors().len(),
        model.queries().len()
    );

    let config = GeneratorConfig::new().with_source_note("example schema");
    let generator = Generator::with_config(&model, config);

    for endpoint in generator.endpoints()?.iter() {
        println!("// {} -> {}", endpoint.key, endpoint.query);
    }

    let source = generator.generate()?;
    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, &source)?;
            println!("// written to {path}");
        }
        None => print!("{source}"),
    }

    Ok(())
}
