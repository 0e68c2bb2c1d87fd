//! Schema to TypeScript type synthesis.
//!
//! `Synthesizer::synthesize` maps one schema node to a `TsType`, checking the
//! node's keywords in a fixed priority order:
//!
//! 1. `$ref` (resolved and expanded inline)
//! 2. wrapped `schema`
//! 3. `anyOf`
//! 4. `oneOf` (with discriminator rewriting)
//! 5. `allOf`
//! 6. `const`
//! 7. `array`
//! 8. `enum`
//! 9. `object`
//! 10. primitives by `(type, format)`
//!
//! References are expanded in place, so a synthesizer tracks the pointers it
//! is currently inside and rejects a reference cycle instead of recursing
//! forever.

use indexmap::IndexMap;
use tracing::trace;

use super::types::{ObjectShape, TsPrimitive, TsProp, TsType};
use super::utils::{enum_value_to_literal, json_value_to_literal};
use crate::error::GenerateResult;
use crate::openapi::resolve::{RefStack, Resolver, ref_name};
use crate::openapi::spec::{AdditionalProperties, Discriminator, EnumValue, Schema};

/// Whether a type describes data sent by the client or received from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Request,
    Response,
}

/// Recursive schema to type converter for one usage context.
#[derive(Debug)]
pub struct Synthesizer<'a> {
    resolver: Resolver<'a>,
    usage: Usage,
    stack: RefStack,
}

impl<'a> Synthesizer<'a> {
    pub fn new(resolver: Resolver<'a>, usage: Usage) -> Self {
        Self {
            resolver,
            usage,
            stack: RefStack::default(),
        }
    }

    /// Convert a Schema to TsType
    pub fn synthesize(&mut self, schema: &Schema) -> GenerateResult<TsType> {
        if let Some(pointer) = &schema.ref_path {
            return self.synthesize_ref(pointer);
        }

        if let Some(inner) = &schema.schema {
            return self.synthesize(inner);
        }

        if let Some(any_of) = &schema.any_of {
            let members = self.synthesize_all(any_of)?;
            return Ok(TsType::union_of(members));
        }

        if let Some(one_of) = &schema.one_of {
            return self.synthesize_one_of(one_of, schema.discriminator.as_ref());
        }

        if let Some(all_of) = &schema.all_of {
            let members = self.synthesize_all(all_of)?;
            return Ok(TsType::intersection_of(members));
        }

        if let Some(literal) = schema.const_value.as_ref().and_then(json_value_to_literal) {
            return Ok(TsType::Literal(literal));
        }

        let nullable = schema.is_nullable();
        let declared = schema.declared_types();
        let core = match &schema.enum_values {
            _ if declared.len() < 2 => self.synthesize_typed(schema.primary_type(), schema)?,
            // One literal union for the whole type list.
            Some(values) if !declared.contains(&"array") => enum_to_union_type(values, false),
            _ => {
                let members = declared
                    .iter()
                    .map(|t| self.synthesize_typed(Some(*t), schema))
                    .collect::<GenerateResult<Vec<_>>>()?;
                TsType::Union(members)
            }
        };

        Ok(core.nullable(nullable))
    }

    fn synthesize_ref(&mut self, pointer: &str) -> GenerateResult<TsType> {
        let target: Schema = self.resolver.resolve(pointer)?;
        self.stack.enter(pointer)?;
        let result = self.synthesize(&target);
        self.stack.exit();
        result
    }

    fn synthesize_all(&mut self, schemas: &[Schema]) -> GenerateResult<Vec<TsType>> {
        schemas.iter().map(|s| self.synthesize(s)).collect()
    }

    /// oneOf: a plain union, unless a discriminator applies to `$ref`-only members.
    fn synthesize_one_of(
        &mut self,
        schemas: &[Schema],
        discriminator: Option<&Discriminator>,
    ) -> GenerateResult<TsType> {
        let discriminator = discriminator.filter(|d| {
            !d.property_name.is_empty() && schemas.iter().all(|s| s.ref_path.is_some())
        });

        let Some(disc) = discriminator else {
            let members = self.synthesize_all(schemas)?;
            return Ok(TsType::union_of(members));
        };

        let mut members = Vec::with_capacity(schemas.len());
        for schema in schemas {
            let mut member = self.synthesize(schema)?;
            if let Some(pointer) = &schema.ref_path {
                let value = discriminator_value(disc, pointer);
                if !member.override_string_field(&disc.property_name, &value) {
                    trace!(
                        pointer = %pointer,
                        property = %disc.property_name,
                        "Discriminator field is not a plain string, left untouched."
                    );
                }
            }
            members.push(member);
        }
        Ok(TsType::union_of(members))
    }

    /// Synthesize a schema as one specific `type` (or none).
    fn synthesize_typed(&mut self, ty: Option<&str>, schema: &Schema) -> GenerateResult<TsType> {
        if ty == Some("array") {
            let item = match &schema.items {
                Some(items) => self.synthesize(items)?,
                None => TsType::unknown(),
            };
            return Ok(TsType::Array(Box::new(item)));
        }

        if let Some(values) = &schema.enum_values {
            return Ok(enum_to_union_type(values, ty == Some("string")));
        }

        match ty {
            Some("object") => self.synthesize_object(schema),
            Some("string") => Ok(self.string_type(schema.format.as_deref())),
            Some("integer" | "number") => Ok(TsType::Primitive(TsPrimitive::Number)),
            Some("boolean") => Ok(TsType::Primitive(TsPrimitive::Boolean)),
            Some("null") => Ok(TsType::Primitive(TsPrimitive::Null)),
            _ => Ok(TsType::unknown()),
        }
    }

    fn string_type(&self, format: Option<&str>) -> TsType {
        let date_like = matches!(format, Some("date" | "date-time"));
        if date_like && self.usage == Usage::Request {
            TsType::Union(vec![TsType::string(), TsType::Ref("Date".into())])
        } else {
            TsType::string()
        }
    }

    /// Object type: fields from `properties`, else from `additionalProperties.properties`.
    fn synthesize_object(&mut self, schema: &Schema) -> GenerateResult<TsType> {
        let nested = match &schema.additional_properties {
            Some(AdditionalProperties::Schema(s)) => Some(s.as_ref()),
            _ => None,
        };

        let (properties, required) = if let Some(props) = &schema.properties {
            (props, schema.required.as_deref())
        } else if let Some((props, n)) =
            nested.and_then(|n| n.properties.as_ref().map(|props| (props, n)))
        {
            (props, n.required.as_deref())
        } else {
            return self.synthesize_opaque_object(nested);
        };

        let mut shape = ObjectShape::new(self.synthesize_properties(properties, required)?);
        if matches!(
            schema.additional_properties,
            Some(AdditionalProperties::Bool(true))
        ) {
            shape.index_signature = Some(Box::new(TsType::unknown()));
        }

        let Some(nested) = nested else {
            return Ok(TsType::Object(shape));
        };

        if nested.primary_type() == Some("object") {
            return Ok(TsType::Record(Box::new(TsType::Object(shape))));
        }

        // Typed additional values next to declared properties.
        let value = self.synthesize(nested)?;
        Ok(TsType::Intersection(vec![
            TsType::Object(shape),
            TsType::Record(Box::new(value)),
        ]))
    }

    /// Object without any property source.
    fn synthesize_opaque_object(&mut self, nested: Option<&Schema>) -> GenerateResult<TsType> {
        match nested {
            Some(n) if n.primary_type().is_some() || n.ref_path.is_some() || n.is_composition() => {
                let value = self.synthesize(n)?;
                Ok(TsType::Record(Box::new(value)))
            }
            _ => Ok(TsType::Primitive(TsPrimitive::Object)),
        }
    }

    fn synthesize_properties(
        &mut self,
        properties: &IndexMap<String, Schema>,
        required: Option<&[String]>,
    ) -> GenerateResult<Vec<TsProp>> {
        let required = required.unwrap_or_default();
        properties
            .iter()
            .map(|(name, schema)| {
                Ok(TsProp {
                    name: name.clone(),
                    ty: self.synthesize(schema)?,
                    optional: !required.contains(name),
                })
            })
            .collect()
    }
}

/// The literal a discriminated member's field is pinned to.
fn discriminator_value(disc: &Discriminator, pointer: &str) -> String {
    disc.mapping
        .as_ref()
        .and_then(|mapping| {
            mapping
                .iter()
                .find(|(_, target)| target.as_str() == pointer)
                .map(|(key, _)| key.clone())
        })
        .unwrap_or_else(|| ref_name(pointer))
}

/// Convert enum values to union of literal types
fn enum_to_union_type(values: &[EnumValue], string_typed: bool) -> TsType {
    let types: Vec<_> = values
        .iter()
        .map(|v| match enum_value_to_literal(v, string_typed) {
            Some(literal) => TsType::Literal(literal),
            None => TsType::unknown(),
        })
        .collect();
    TsType::union_of(types)
}
