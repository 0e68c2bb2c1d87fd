//! OpenAPI document structs for serde deserialization.
//!
//! Only the subset needed to synthesize request and response declarations is
//! modelled. Maps are `IndexMap`s so that declaration order in the source
//! document survives into the generated output.

use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::GenerateResult;

/// Root OpenAPI document.
#[derive(Debug, Deserialize)]
pub struct OpenApiSpec {
    #[serde(default, deserialize_with = "without_extensions")]
    pub paths: IndexMap<String, PathItem>,
}

/// A path item containing operations for different HTTP methods.
#[derive(Debug, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
    /// Path-level parameters shared by all operations.
    pub parameters: Option<Vec<Parameter>>,
}

impl PathItem {
    /// Operations in OpenAPI declaration order.
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        [
            ("get", self.get.as_ref()),
            ("put", self.put.as_ref()),
            ("post", self.post.as_ref()),
            ("delete", self.delete.as_ref()),
            ("options", self.options.as_ref()),
            ("head", self.head.as_ref()),
            ("patch", self.patch.as_ref()),
            ("trace", self.trace.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
        .collect()
    }
}

/// An API operation (endpoint).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub request_body: Option<RequestBody>,
    #[serde(default, deserialize_with = "optional_without_extensions")]
    pub responses: Option<IndexMap<String, Response>>,
}

/// A parameter (query, path, header, cookie or Swagger 2 body).
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "in", default)]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Schema>,

    // Swagger 2 non-body parameters carry their type inline.
    #[serde(rename = "type")]
    pub param_type: Option<SchemaType>,
    pub format: Option<String>,
    pub items: Option<Box<Schema>>,
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,
}

impl Parameter {
    /// Wrap the parameter's value description in a schema node.
    ///
    /// OpenAPI 3 parameters keep it under `schema`; Swagger 2 parameters
    /// declare `type`/`format`/`items`/`enum` on the parameter itself.
    pub fn value_schema(&self) -> Schema {
        if let Some(schema) = &self.schema {
            return Schema {
                schema: Some(Box::new(schema.clone())),
                ..Schema::default()
            };
        }
        Schema {
            schema_type: Some(
                self.param_type
                    .clone()
                    .unwrap_or_else(|| SchemaType::Single("string".into())),
            ),
            format: self.format.clone(),
            items: self.items.clone(),
            enum_values: self.enum_values.clone(),
            ..Schema::default()
        }
    }
}

/// A request body definition.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub content: Option<IndexMap<String, MediaType>>,
}

/// A response definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// JSON Schema definition used in OpenAPI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// The type of the schema (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Reference to another schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Wrapped schema (parameter objects and media types nest the real schema here).
    pub schema: Option<Box<Schema>>,

    /// Properties for object types.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Enum values (can be strings, integers, floats, booleans, or null).
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Union type (any of these schemas).
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<Schema>>,

    /// Union type (exactly one of these schemas).
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<Schema>>,

    /// Intersection type (all of these schemas combined).
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<Schema>>,

    /// Additional properties for object types.
    pub additional_properties: Option<AdditionalProperties>,

    /// Discriminator for polymorphic oneOf schemas.
    pub discriminator: Option<Discriminator>,

    /// Format hint (e.g., date-time, uuid).
    pub format: Option<String>,

    /// Constant value - schema matches only this exact value.
    #[serde(rename = "const")]
    pub const_value: Option<Value>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead).
    pub nullable: Option<bool>,
}

/// Enum value: a scalar literal, or any other JSON value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Objects and arrays
    Other(Value),
}

/// Discriminator for polymorphic schemas (oneOf).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// The property name that contains the discriminator value.
    #[serde(default)]
    pub property_name: String,
    /// Optional mapping from discriminator values to schema refs.
    pub mapping: Option<IndexMap<String, String>>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// Map whose `x-` extension keys are dropped before the values are typed.
fn without_extensions<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    typed_entries(IndexMap::<String, Value>::deserialize(deserializer)?)
}

fn optional_without_extensions<'de, D, T>(
    deserializer: D,
) -> Result<Option<IndexMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<IndexMap<String, Value>>::deserialize(deserializer)?
        .map(typed_entries::<T, D::Error>)
        .transpose()
}

fn typed_entries<T, E>(raw: IndexMap<String, Value>) -> Result<IndexMap<String, T>, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    raw.into_iter()
        .filter(|(key, _)| !key.starts_with("x-"))
        .map(|(key, value)| {
            let typed = T::deserialize(value).map_err(|e| E::custom(format!("{key}: {e}")))?;
            Ok((key, typed))
        })
        .collect()
}

impl OpenApiSpec {
    /// Read the typed view of an already-parsed OpenAPI document.
    pub fn from_value(document: &Value) -> GenerateResult<Self> {
        Ok(Self::deserialize(document)?)
    }
}

impl Schema {
    /// Check if this schema is nullable (nullable flag or `null` in a type array).
    pub fn is_nullable(&self) -> bool {
        if self.nullable == Some(true) {
            return true;
        }

        matches!(
            &self.schema_type,
            Some(SchemaType::Multiple(types)) if types.iter().any(|t| t == "null")
        )
    }

    /// Declared non-null types, in declaration order.
    pub fn declared_types(&self) -> Vec<&str> {
        match &self.schema_type {
            Some(SchemaType::Single(t)) => vec![t.as_str()],
            Some(SchemaType::Multiple(types)) => types
                .iter()
                .map(String::as_str)
                .filter(|t| *t != "null")
                .collect(),
            None => Vec::new(),
        }
    }

    /// The single type this schema describes, inferring `object`/`array` from
    /// structural keywords when `type` is absent.
    pub fn primary_type(&self) -> Option<&str> {
        if let Some(first) = self.declared_types().into_iter().next() {
            return Some(first);
        }
        if self.properties.is_some() || self.additional_properties.is_some() {
            Some("object")
        } else if self.items.is_some() {
            Some("array")
        } else {
            None
        }
    }

    /// Whether any of `anyOf`/`oneOf`/`allOf` is present.
    pub fn is_composition(&self) -> bool {
        self.any_of.is_some() || self.one_of.is_some() || self.all_of.is_some()
    }
}
