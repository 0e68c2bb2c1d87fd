//! API-level IR for normalized operations.
//!
//! This module defines the intermediate representation for API operations:
//! - OperationIR: Normalized HTTP operations
//! - RequestIR: The request declaration and how it was shaped
//! - ResponsesIR: Per-status aliases and the operation's response union

use super::types::TsTypeDef;
use crate::output::Diagnostic;

/// How request parameters are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Every parameter and body field merged into one object
    Flat,
    /// Separate `body`/`path`/`query`/`headers` sub-objects
    Full,
}

/// Request declaration for one operation
#[derive(Debug, Clone)]
pub struct RequestIR {
    /// Interface or alias named `${Op}Request`
    pub type_def: TsTypeDef,
    /// Whether callers may omit the request entirely
    pub optional: bool,
    pub mode: RequestMode,
}

/// Response declarations for one operation
#[derive(Debug, Clone)]
pub struct ResponsesIR {
    /// One alias per declared status code, in declaration order
    pub aliases: Vec<TsTypeDef>,
    /// `${Op}Responses`
    pub union: TsTypeDef,
    /// Whether members are wrapped in `FullResponse`
    pub full_response: bool,
    /// Whether a `1XX`..`5XX` range code appears in an envelope
    pub uses_status_range: bool,
}

/// Normalized API operation
#[derive(Debug, Clone)]
pub struct OperationIR {
    /// PascalCase prefix for generated type names (e.g., "ListPets")
    pub name: String,
    /// Method name on the client interface (e.g., "listPets")
    pub method_name: String,
    pub request: Option<RequestIR>,
    pub responses: ResponsesIR,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalized API document
#[derive(Debug)]
pub struct ApiIR {
    /// All operations, in document order
    pub operations: Vec<OperationIR>,
}
