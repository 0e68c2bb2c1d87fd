//! GraphQL introspection to TypeScript declaration generator.
//!
//! Every object type of the schema becomes one interface whose fields are
//! all optional, since a query may select any subset of them. The call
//! surface is a fixed `query`/`mutate` pair, independent of the schema.

mod introspection;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::GeneratorOptions;
use crate::error::{GenerateError, GenerateResult};
use crate::openapi::ir::{
    Emit, ObjectShape, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsType, TsTypeDef,
    TypeDefKind, capitalize_first, promise_of,
};
use crate::output::GeneratedOutput;

pub use introspection::{Field, FullType, IntrospectionSchema, TypeKind, TypeRef};

/// Object types never projected: root operation types and built-in scalars
/// some servers report as objects.
pub const DEFAULT_SKIPPED_TYPES: &[&str] = &["Query", "Mutation", "Subscription", "Boolean", "String"];

/// Client interface name when none is configured.
pub const DEFAULT_CLIENT_NAME: &str = "GraphQLClient";

/// Projects introspected object types onto TypeScript interfaces.
#[derive(Debug, Clone, Copy)]
pub struct GraphqlProjector {
    skip: &'static [&'static str],
}

impl Default for GraphqlProjector {
    fn default() -> Self {
        Self::new(DEFAULT_SKIPPED_TYPES)
    }
}

impl GraphqlProjector {
    pub fn new(skip: &'static [&'static str]) -> Self {
        Self { skip }
    }

    fn is_skipped(&self, name: &str) -> bool {
        name.starts_with("__") || self.skip.contains(&name)
    }

    /// One interface per projected object type, in schema order.
    pub fn project(&self, schema: &IntrospectionSchema) -> GenerateResult<TsModule> {
        let mut types = Vec::new();
        for ty in &schema.types {
            let Some(name) = ty.name.as_deref() else {
                continue;
            };
            if ty.kind != TypeKind::Object || self.is_skipped(name) {
                trace!(name = %name, kind = ty.kind.as_str(), "Skipping type.");
                continue;
            }
            types.push(project_object(name, ty)?);
        }
        debug!(interfaces = types.len(), "Projected GraphQL object types.");
        Ok(TsModule { types })
    }
}

fn project_object(name: &str, ty: &FullType) -> GenerateResult<TsTypeDef> {
    let props = ty
        .fields
        .iter()
        .flatten()
        .map(|field| {
            Ok(TsProp {
                name: field.name.clone(),
                ty: field_type(&field.field_type)?,
                optional: true,
            })
        })
        .collect::<GenerateResult<Vec<_>>>()?;
    Ok(TsTypeDef::interface(
        capitalize_first(name),
        ObjectShape::new(props),
    ))
}

fn field_type(type_ref: &TypeRef) -> GenerateResult<TsType> {
    match type_ref.kind {
        TypeKind::Scalar => scalar_type(type_name(type_ref)?),
        TypeKind::List => {
            let element = type_ref
                .of_type
                .as_deref()
                .ok_or_else(|| GenerateError::UnknownType(TypeKind::List.as_str().to_string()))?;
            // Elements are named, never mapped through the scalar table.
            let inner = TsType::Ref(capitalize_first(type_name(element)?));
            Ok(TsType::Array(Box::new(inner)))
        }
        TypeKind::Object => Ok(TsType::Ref(capitalize_first(type_name(type_ref)?))),
        other => Err(GenerateError::UnknownType(other.as_str().to_string())),
    }
}

fn type_name(type_ref: &TypeRef) -> GenerateResult<&str> {
    type_ref
        .name
        .as_deref()
        .ok_or_else(|| GenerateError::UnknownType(type_ref.kind.as_str().to_string()))
}

fn scalar_type(name: &str) -> GenerateResult<TsType> {
    match name {
        "String" | "ID" | "Date" | "DateTime" => Ok(TsType::string()),
        "Int" | "Float" => Ok(TsType::Primitive(TsPrimitive::Number)),
        other => Err(GenerateError::UnknownType(other.to_string())),
    }
}

/// `query`/`mutate` methods taking a document and its variables.
fn codegen_client(name: &str) -> TsTypeDef {
    let method = |method_name: &str| TsMethod {
        name: method_name.into(),
        type_params: vec!["T = unknown".into()],
        params: vec![
            TsParam {
                name: "document".into(),
                ty: TsType::string(),
                optional: false,
            },
            TsParam {
                name: "variables".into(),
                ty: TsType::Record(Box::new(TsType::unknown())),
                optional: true,
            },
        ],
        return_type: promise_of(TsType::Ref("T".into())),
    };
    TsTypeDef {
        name: name.to_string(),
        type_params: Vec::new(),
        kind: TypeDefKind::Interface {
            shape: ObjectShape::default(),
            methods: vec![method("query"), method("mutate")],
        },
    }
}

/// Generate TypeScript declarations from a GraphQL introspection result.
pub fn generate(introspection: &Value, options: &GeneratorOptions) -> GenerateResult<GeneratedOutput> {
    let schema = IntrospectionSchema::from_value(introspection)?;
    let module = GraphqlProjector::default().project(&schema)?;
    let client_name = options.client_name.as_deref().unwrap_or(DEFAULT_CLIENT_NAME);

    Ok(GeneratedOutput {
        declarations: module.emit(),
        client: codegen_client(client_name).emit(),
        diagnostics: Vec::new(),
    })
}
