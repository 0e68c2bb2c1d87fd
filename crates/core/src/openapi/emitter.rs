//! TypeScript declaration emitter for OpenAPI documents.
//!
//! This module is a thin wrapper around the IR-based code generation.
//! The pipeline is:
//! 1. Normalize: OpenAPI JSON -> ApiIR (parsing, naming, synthesis)
//! 2. Codegen: ApiIR -> TsModule plus the client interface
//! 3. Emit: TsModule -> String (via Emit trait)

use serde_json::Value;
use tracing::debug;

use crate::config::GeneratorOptions;
use crate::error::GenerateResult;
use crate::openapi::ir::{Emit, codegen_client, codegen_module, normalize_spec};
use crate::output::GeneratedOutput;

/// Client interface name when none is configured.
pub const DEFAULT_CLIENT_NAME: &str = "ApiClient";

/// Generate TypeScript declarations from a parsed OpenAPI document.
///
/// Generation is all-or-nothing: the first error aborts the whole document.
pub fn generate(document: &Value, options: &GeneratorOptions) -> GenerateResult<GeneratedOutput> {
    let api_ir = normalize_spec(document, options)?;

    let client_name = options.client_name.as_deref().unwrap_or(DEFAULT_CLIENT_NAME);
    let declarations = codegen_module(&api_ir).emit();
    let client = codegen_client(&api_ir, client_name).emit();
    let diagnostics: Vec<_> = api_ir
        .operations
        .into_iter()
        .flat_map(|op| op.diagnostics)
        .collect();

    debug!(
        client = %client_name,
        diagnostics = diagnostics.len(),
        "Generated OpenAPI declarations."
    );
    Ok(GeneratedOutput {
        declarations,
        client,
        diagnostics,
    })
}
