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

//! TypeScript declarations for API clients.
//!
//! Two front ends share one type IR and emitter:
//! - [`openapi::generate`] reads an OpenAPI document and produces request
//!   and response declarations plus a client interface
//! - [`graphql::generate`] reads a GraphQL introspection result and produces
//!   one interface per object type plus a `query`/`mutate` client
//!
//! Both take an already-parsed `serde_json::Value` and return text buffers;
//! loading documents and writing files is left to the caller.

pub mod config;
pub mod error;
pub mod graphql;
pub mod openapi;
pub mod output;

pub use config::GeneratorOptions;
pub use error::{GenerateError, GenerateResult};
pub use output::{Diagnostic, GeneratedOutput};
