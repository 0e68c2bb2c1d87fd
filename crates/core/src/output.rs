//! Generated text buffers handed to the file-writing layer.

use std::fmt;

/// Result of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GeneratedOutput {
    /// Interface and type alias declarations.
    pub declarations: String,
    /// Call-surface declaration for the generated client.
    pub client: String,
    /// Non-fatal findings collected while generating.
    pub diagnostics: Vec<Diagnostic>,
}

/// A non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A request property dropped because an earlier one had the same name.
    ShadowedProperty {
        operation: String,
        property: String,
        location: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ShadowedProperty {
                operation,
                property,
                location,
            } => write!(
                f,
                "{operation}: {location} property '{property}' is shadowed by an earlier property of the same name"
            ),
        }
    }
}
