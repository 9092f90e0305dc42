//! Command line arguments.

use clap::Parser;
use helixgen_codegen::{GeneratorConfig, IdRepresentation};
use std::path::PathBuf;
use std::time::Duration;

/// Generate TypeScript types and a typed client from a HelixDB schema.
#[derive(Debug, Parser)]
#[command(name = "helixgen", version, about)]
pub struct Args {
    /// HelixDB base URL; the schema is fetched from `<endpoint>/introspect`.
    #[arg(
        short = 'u',
        long = "endpoint",
        env = "HELIX_ENDPOINT",
        default_value = "http://localhost:6969"
    )]
    pub endpoint: String,

    /// Read the introspection payload from a file instead of fetching it.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Where to write the generated module.
    #[arg(short = 'o', long = "output-file", default_value = "helix-client.ts")]
    pub output_file: PathBuf,

    /// Module the runtime client is imported from.
    #[arg(long = "client-module", default_value = "helix-ts")]
    pub client_module: String,

    /// TypeScript representation of identifiers: `bigint` or `string`.
    #[arg(long = "id-type", default_value_t = IdRepresentation::BigInt)]
    pub id_type: IdRepresentation,

    /// Timeout for the introspection request, in seconds.
    #[arg(long = "timeout-secs", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Args {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Generator configuration derived from the flags.
    pub fn generator_config(&self) -> GeneratorConfig {
        let source = match &self.input {
            Some(path) => path.display().to_string(),
            None => crate::fetch::introspect_url(&self.endpoint),
        };
        GeneratorConfig::new()
            .with_client_module(self.client_module.as_str())
            .with_id_representation(self.id_type)
            .with_source_note(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["helixgen", "-u", "http://db:6969"]).expect("Failed to parse");
        assert_eq!(args.endpoint, "http://db:6969");
        assert_eq!(args.output_file, PathBuf::from("helix-client.ts"));
        assert_eq!(args.id_type, IdRepresentation::BigInt);
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert!(args.input.is_none());

        let config = args.generator_config();
        assert_eq!(config.client_module, "helix-ts");
        assert_eq!(config.source_note, "http://db:6969/introspect");
    }

    #[test]
    fn test_file_input_and_id_type() {
        let args = Args::try_parse_from([
            "helixgen",
            "--input",
            "schema.json",
            "--id-type",
            "string",
            "-o",
            "out/client.ts",
            "--client-module",
            "@acme/helix",
        ])
        .expect("Failed to parse");

        let config = args.generator_config();
        assert_eq!(config.id_representation, IdRepresentation::String);
        assert_eq!(config.client_module, "@acme/helix");
        assert_eq!(config.source_note, "schema.json");
    }

    #[test]
    fn test_rejects_unknown_id_type() {
        assert!(Args::try_parse_from(["helixgen", "--id-type", "number"]).is_err());
    }
}
