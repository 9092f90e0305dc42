//! helixgen: generate TypeScript bindings from a HelixDB schema.
//!
//! Run with: `helixgen -u http://localhost:6969 -o helix-client.ts`
//!
//! Set `RUST_LOG=debug` for parser and generator details.

mod args;
mod fetch;
mod output;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use helixgen_codegen::Generator;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    run(&args).await
}

async fn run(args: &Args) -> Result<()> {
    let payload = match &args.input {
        Some(path) => fetch::read_introspection(path)?,
        None => fetch::fetch_introspection(&args.endpoint, args.timeout()).await?,
    };

    let model = helixgen_schema::parse_introspection(&payload)
        .context("failed to parse introspection payload")?;
    tracing::info!(
        nodes = model.nodes().len(),
        vectors = model.vectors().len(),
        edges = model.edges().len(),
        queries = model.queries().len(),
        "schema loaded"
    );

    let source = Generator::with_config(&model, args.generator_config())
        .generate()
        .context("failed to generate TypeScript bindings")?;

    output::write_atomic(&args.output_file, &source)?;
    tracing::info!(
        path = %args.output_file.display(),
        bytes = source.len(),
        "TypeScript bindings generated"
    );
    tracing::info!(
        "Import with: import {{ TypedHelixDBClient, createTypedClient }} from '{}'",
        output::import_hint(&args.output_file)
    );

    Ok(())
}
