//! OpenAPI to TypeScript declaration generator.
//!
//! This module reads OpenAPI 3.x (and Swagger 2 style) documents and generates:
//! - A request interface per operation, flat or split by parameter location
//! - Per-status response aliases and a response union per operation
//! - A client interface with one method per operation

mod emitter;
pub(crate) mod ir;
mod resolve;
mod spec;

pub use emitter::{DEFAULT_CLIENT_NAME, generate};
