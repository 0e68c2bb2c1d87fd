//! Generator options.
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! full-request = false
//! full-response = true
//! optional-headers = ["Authorization", "X-Api-Key"]
//! client-name = "PetstoreClient"
//! ```

use serde::Deserialize;

use crate::error::GenerateResult;

const DEFAULT_OPTIONAL_HEADERS: [&str; 1] = ["Authorization"];

/// Options controlling request and response shape selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Always emit `body`/`path`/`query`/`headers` sub-objects for requests.
    pub full_request: bool,
    /// Always wrap response members in the `FullResponse` envelope.
    pub full_response: bool,
    /// Header names that are optional regardless of the schema (case-insensitive).
    pub optional_headers: Vec<String>,
    /// Name of the generated call-surface interface.
    pub client_name: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            full_request: false,
            full_response: false,
            optional_headers: DEFAULT_OPTIONAL_HEADERS
                .iter()
                .map(|h| (*h).to_string())
                .collect(),
            client_name: None,
        }
    }
}

impl GeneratorOptions {
    /// Parse options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> GenerateResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Whether a header parameter is forced optional.
    pub fn is_optional_header(&self, name: &str) -> bool {
        self.optional_headers
            .iter()
            .any(|h| h.eq_ignore_ascii_case(name))
    }
}
