//! Serde view of a GraphQL introspection result.
//!
//! Only the parts the projector reads are modelled; everything else in the
//! introspection payload is ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::error::GenerateResult;

/// `{ "__schema": ... }`, optionally wrapped in a `{ "data": ... }` response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Response { data: Root },
    Bare(Root),
}

#[derive(Debug, Deserialize)]
struct Root {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub types: Vec<FullType>,
}

impl IntrospectionSchema {
    /// Read the schema from an introspection result or a bare `__schema` object.
    pub fn from_value(introspection: &Value) -> GenerateResult<Self> {
        let schema = match Envelope::deserialize(introspection)? {
            Envelope::Response { data } => data.schema,
            Envelope::Bare(root) => root.schema,
        };
        Ok(schema)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FullType {
    pub kind: TypeKind,
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeRef,
}

/// A possibly wrapped reference to a named type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
            TypeKind::Unknown => "UNKNOWN",
        }
    }
}
