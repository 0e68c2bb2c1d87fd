#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::Parser;
use clientgen_core::{GeneratedOutput, GeneratorOptions, graphql, openapi};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Generate TypeScript client declarations from an OpenAPI document or a
/// GraphQL introspection result.
#[derive(Parser, Debug, Clone)]
#[command(name = "clientgen", version, about)]
pub struct GenerateArgs {
    /// Path to the JSON document to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Treat the input as a GraphQL introspection result
    #[arg(long)]
    pub graphql: bool,

    /// TOML file with generator options
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Always split requests into body/path/query/headers
    #[arg(long)]
    pub full_request: bool,

    /// Always wrap responses in the FullResponse envelope
    #[arg(long)]
    pub full_response: bool,

    /// Name of the generated client interface
    #[arg(long, value_name = "NAME")]
    pub client_name: Option<String>,

    /// Write the declarations here instead of stdout
    #[arg(long, short, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let args = GenerateArgs::parse();
    std::process::exit(run(args));
}

pub fn run(args: GenerateArgs) -> i32 {
    match generate(&args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<(), String> {
    let options = load_options(args)?;

    let source = fs::read_to_string(&args.input)
        .map_err(|e| format!("Failed to read {}: {e}", args.input.display()))?;
    let document: Value = serde_json::from_str(&source)
        .map_err(|e| format!("Failed to parse {}: {e}", args.input.display()))?;
    debug!(input = %args.input.display(), graphql = args.graphql, "Loaded document.");

    let output = if args.graphql {
        graphql::generate(&document, &options)
    } else {
        openapi::generate(&document, &options)
    }
    .map_err(|e| e.to_string())?;

    for diagnostic in &output.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let text = render(&output);
    match &args.output {
        Some(path) => {
            fs::write(path, text)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            info!(output = %path.display(), "Wrote declarations.");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Options from the config file, then command-line overrides.
fn load_options(args: &GenerateArgs) -> Result<GeneratorOptions, String> {
    let mut options = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            GeneratorOptions::from_toml_str(&source)
                .map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => GeneratorOptions::default(),
    };

    options.full_request |= args.full_request;
    options.full_response |= args.full_response;
    if let Some(name) = &args.client_name {
        options.client_name = Some(name.clone());
    }
    Ok(options)
}

fn render(output: &GeneratedOutput) -> String {
    if output.declarations.is_empty() {
        output.client.clone()
    } else {
        format!("{}\n{}", output.declarations, output.client)
    }
}

fn init_tracing() {
    // CLIENTGEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "clientgen_core=trace"
    let filter = match std::env::var("CLIENTGEN_LOG") {
        Ok(level) if is_plain_level(&level) => {
            format!("clientgen={level},clientgen_core={level}")
        }
        Ok(spec) => spec,
        Err(_) => "clientgen=info,clientgen_core=info".to_string(),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
