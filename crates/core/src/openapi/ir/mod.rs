//! Intermediate Representation for OpenAPI to TypeScript declaration generation.
//!
//! This module defines a three-layer architecture:
//! 1. API-level IR: Normalized operations with their request and response declarations
//! 2. TypeScript IR: Type expressions and top-level declarations
//! 3. Emission: IR to TypeScript code strings via the `Emit` trait
//!
//! The separation allows:
//! - All OpenAPI corner cases resolved in normalization
//! - Discriminator rewriting as a tree transform, before any text exists
//! - Emission is purely mechanical string building
//!
//! ## Module Structure
//!
//! - `types`: TypeScript IR (TsType, ObjectShape, TsTypeDef, TsModule)
//! - `api`: API-level IR (OperationIR, RequestIR, ResponsesIR)
//! - `synthesize`: schema -> TsType
//! - `request`: parameter classification and request declarations
//! - `response`: per-status aliases, response unions, the envelope decision
//! - `normalize`: OpenAPI document -> API IR
//! - `codegen`: API IR -> declaration module and client interface
//! - `emit`: TypeScript IR -> code strings (via Emit trait)
//! - `utils`: Common utilities shared across modules

mod api;
mod codegen;
mod emit;
mod normalize;
mod request;
mod response;
mod synthesize;
mod types;
mod utils;

pub(crate) use codegen::{codegen_client, codegen_module, promise_of};
pub(crate) use emit::Emit;
pub(crate) use normalize::normalize_spec;
pub(crate) use types::{
    ObjectShape, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind,
};
pub(crate) use utils::capitalize_first;
