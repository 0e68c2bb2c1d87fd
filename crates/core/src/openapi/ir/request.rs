//! Request declarations.
//!
//! Parameters are bucketed by location, then laid out either flat (one
//! object holding every parameter plus the fields of a JSON object body) or
//! full (`body`/`path`/`query`/`headers` sub-objects). Full mode is used when
//! the caller asks for it, when a name appears in more than one location, or
//! when a non-object body has to sit next to path or query parameters.

use std::collections::HashSet;

use tracing::{trace, warn};

use super::api::{RequestIR, RequestMode};
use super::synthesize::{Synthesizer, Usage};
use super::types::{ObjectShape, TsProp, TsType, TsTypeDef};
use crate::config::GeneratorOptions;
use crate::error::{GenerateError, GenerateResult};
use crate::openapi::resolve::Resolver;
use crate::openapi::spec::{Operation, Parameter, Schema};
use crate::output::Diagnostic;

const MULTIPART_FORM_DATA: &str = "multipart/form-data";
const APPLICATION_JSON: &str = "application/json";

/// Parameters bucketed by location.
#[derive(Debug, Default)]
pub struct ParamGroups {
    pub path: Vec<TsProp>,
    pub query: Vec<TsProp>,
    pub headers: Vec<TsProp>,
}

impl ParamGroups {
    fn has_path_or_query(&self) -> bool {
        !self.path.is_empty() || !self.query.is_empty()
    }

    fn named(&self) -> [(&'static str, &[TsProp]); 3] {
        [
            ("path", self.path.as_slice()),
            ("query", self.query.as_slice()),
            ("headers", self.headers.as_slice()),
        ]
    }
}

/// How a JSON body can be combined with parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    /// Fields can be merged next to parameters
    Object,
    /// Array or plain value; needs its own `body` key
    Value,
}

/// Request body after content negotiation.
#[derive(Debug)]
enum BodyIR {
    FormData { required: bool },
    Json { ty: TsType, kind: BodyKind, required: bool },
}

impl BodyIR {
    /// Type and optionality of the `body` key in full mode.
    fn as_prop(&self) -> TsProp {
        let (ty, optional) = match self {
            BodyIR::FormData { required } => (TsType::Ref("FormData".into()), !required),
            BodyIR::Json {
                ty: TsType::Object(shape),
                ..
            } => (TsType::Object(shape.clone()), shape.all_optional()),
            BodyIR::Json { ty, required, .. } => (ty.clone(), !required),
        };
        TsProp {
            name: "body".into(),
            ty,
            optional,
        }
    }

    fn names(&self) -> Vec<&str> {
        match self {
            BodyIR::Json {
                ty: TsType::Object(shape),
                kind: BodyKind::Object,
                ..
            } => shape.props.iter().map(|p| p.name.as_str()).collect(),
            BodyIR::FormData { .. } => vec!["body"],
            BodyIR::Json { .. } => Vec::new(),
        }
    }
}

/// Builds the `${Op}Request` declaration for one operation.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    operation_name: &'a str,
    resolver: Resolver<'a>,
    options: &'a GeneratorOptions,
    synthesizer: Synthesizer<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(
        operation_name: &'a str,
        resolver: Resolver<'a>,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            operation_name,
            resolver,
            options,
            synthesizer: Synthesizer::new(resolver, Usage::Request),
            diagnostics: Vec::new(),
        }
    }

    /// Build the request declaration; `None` when the operation takes no input.
    ///
    /// Returns the shadowed-property diagnostics alongside.
    pub fn build(
        mut self,
        op: &Operation,
        path_params: Option<&[Parameter]>,
    ) -> GenerateResult<(Option<RequestIR>, Vec<Diagnostic>)> {
        let params = self.collect_parameters(op, path_params)?;
        let (groups, body_param) = self.classify(&params)?;
        let body = self.read_body(op, body_param)?;

        let has_duplicates = cross_group_duplicates(&groups, body.as_ref());
        let value_body_with_params = groups.has_path_or_query()
            && matches!(
                body,
                Some(BodyIR::Json {
                    kind: BodyKind::Value,
                    ..
                })
            );
        let mode = if self.options.full_request || has_duplicates || value_body_with_params {
            RequestMode::Full
        } else {
            RequestMode::Flat
        };
        trace!(
            operation = %self.operation_name,
            mode = ?mode,
            has_duplicates,
            "Selected request mode."
        );

        let request = match mode {
            RequestMode::Flat => self.build_flat(groups, body),
            RequestMode::Full => self.build_full(groups, body),
        };
        Ok((request, self.diagnostics))
    }

    /// Operation parameters followed by path-level ones it does not override.
    fn collect_parameters(
        &self,
        op: &Operation,
        path_params: Option<&[Parameter]>,
    ) -> GenerateResult<Vec<Parameter>> {
        let mut params = Vec::new();
        for p in op.parameters.iter().flatten() {
            params.push(self.resolver.deref(p)?);
        }
        for p in path_params.into_iter().flatten() {
            let p = self.resolver.deref(p)?;
            let overridden = params
                .iter()
                .any(|existing| existing.name == p.name && existing.location == p.location);
            if !overridden {
                params.push(p);
            }
        }
        Ok(params)
    }

    /// Bucket parameters by `in`; a Swagger 2 `body` parameter is returned separately.
    fn classify<'p>(
        &mut self,
        params: &'p [Parameter],
    ) -> GenerateResult<(ParamGroups, Option<&'p Parameter>)> {
        let mut groups = ParamGroups::default();
        let mut body_param = None;

        for param in params {
            let bucket = match param.location.as_str() {
                "path" => &mut groups.path,
                "query" => &mut groups.query,
                "header" => &mut groups.headers,
                "body" => {
                    body_param = body_param.or(Some(param));
                    continue;
                }
                other => {
                    trace!(
                        operation = %self.operation_name,
                        parameter = %param.name,
                        location = %other,
                        "Skipping parameter."
                    );
                    continue;
                }
            };

            let forced_optional =
                param.location == "header" && self.options.is_optional_header(&param.name);
            bucket.push(TsProp {
                name: param.name.clone(),
                ty: self.synthesizer.synthesize(&param.value_schema())?,
                optional: !param.required || forced_optional,
            });
        }

        Ok((groups, body_param))
    }

    /// Content negotiation: multipart wins over JSON; other media types are omitted.
    fn read_body(
        &mut self,
        op: &Operation,
        body_param: Option<&Parameter>,
    ) -> GenerateResult<Option<BodyIR>> {
        if let Some(body) = &op.request_body {
            let body = self.resolver.deref(body)?;
            let Some(content) = &body.content else {
                return Ok(None);
            };
            if content.contains_key(MULTIPART_FORM_DATA) {
                return Ok(Some(BodyIR::FormData {
                    required: body.required,
                }));
            }
            return match content.get(APPLICATION_JSON).and_then(|m| m.schema.as_ref()) {
                Some(schema) => self.json_body(schema, body.required).map(Some),
                None => Ok(None),
            };
        }

        match body_param.and_then(|p| p.schema.as_ref().map(|s| (s, p.required))) {
            Some((schema, required)) => self.json_body(schema, required).map(Some),
            None => Ok(None),
        }
    }

    fn json_body(&mut self, schema: &Schema, required: bool) -> GenerateResult<BodyIR> {
        let target = self.resolver.deref(schema)?;
        let kind = match target.primary_type() {
            Some("object") => BodyKind::Object,
            Some("array" | "string" | "integer" | "number" | "boolean") => BodyKind::Value,
            Some(other) => {
                return Err(GenerateError::TypeNotSupported {
                    operation: self.operation_name.to_string(),
                    schema_type: other.to_string(),
                });
            }
            None if target.all_of.is_some() => BodyKind::Object,
            None => BodyKind::Value,
        };
        Ok(BodyIR::Json {
            ty: self.synthesizer.synthesize(schema)?,
            kind,
            required,
        })
    }

    fn build_flat(&mut self, groups: ParamGroups, body: Option<BodyIR>) -> Option<RequestIR> {
        let mut seen = HashSet::new();
        let mut shape = ObjectShape::default();
        for (location, props) in groups.named() {
            for prop in props {
                self.push_unique(&mut seen, &mut shape, prop.clone(), location);
            }
        }

        let mut standalone = None;
        match body {
            None => {}
            Some(BodyIR::FormData { required }) => {
                let prop = TsProp {
                    name: "body".into(),
                    ty: TsType::Ref("FormData".into()),
                    optional: !required,
                };
                self.push_unique(&mut seen, &mut shape, prop, "body");
            }
            Some(BodyIR::Json {
                ty: TsType::Object(body_shape),
                kind: BodyKind::Object,
                ..
            }) => {
                for prop in body_shape.props {
                    self.push_unique(&mut seen, &mut shape, prop, "body");
                }
                shape.index_signature = body_shape.index_signature;
            }
            Some(BodyIR::Json { ty, required, .. }) => standalone = Some((ty, required)),
        }

        let name = self.type_name();
        match standalone {
            Some((ty, required)) if shape.is_empty() => Some(RequestIR {
                type_def: TsTypeDef::alias(name, ty),
                optional: !required,
                mode: RequestMode::Flat,
            }),
            Some((ty, _)) => Some(RequestIR {
                type_def: TsTypeDef::alias(
                    name,
                    TsType::Intersection(vec![TsType::Object(shape), ty]),
                ),
                optional: false,
                mode: RequestMode::Flat,
            }),
            None if shape.is_empty() => None,
            None => Some(RequestIR {
                optional: shape.all_optional(),
                type_def: TsTypeDef::interface(name, shape),
                mode: RequestMode::Flat,
            }),
        }
    }

    fn build_full(&mut self, groups: ParamGroups, body: Option<BodyIR>) -> Option<RequestIR> {
        let mut shape = ObjectShape::default();
        if let Some(body) = &body {
            shape.props.push(body.as_prop());
        }

        for (location, props) in groups.named() {
            if props.is_empty() {
                continue;
            }
            let mut seen = HashSet::new();
            let mut sub = ObjectShape::default();
            for prop in props {
                self.push_unique(&mut seen, &mut sub, prop.clone(), location);
            }
            shape.props.push(TsProp {
                name: location.to_string(),
                optional: sub.all_optional(),
                ty: TsType::Object(sub),
            });
        }

        if shape.is_empty() {
            return None;
        }
        Some(RequestIR {
            optional: shape.all_optional(),
            type_def: TsTypeDef::interface(self.type_name(), shape),
            mode: RequestMode::Full,
        })
    }

    /// First occurrence wins; later duplicates are reported, not kept.
    fn push_unique(
        &mut self,
        seen: &mut HashSet<String>,
        shape: &mut ObjectShape,
        prop: TsProp,
        location: &str,
    ) {
        if seen.insert(prop.name.clone()) {
            shape.props.push(prop);
            return;
        }
        warn!(
            operation = %self.operation_name,
            property = %prop.name,
            location = %location,
            "Dropping shadowed request property."
        );
        self.diagnostics.push(Diagnostic::ShadowedProperty {
            operation: self.operation_name.to_string(),
            property: prop.name,
            location: location.to_string(),
        });
    }

    fn type_name(&self) -> String {
        format!("{}Request", self.operation_name)
    }
}

/// Whether any name appears in more than one location (body fields included).
fn cross_group_duplicates(groups: &ParamGroups, body: Option<&BodyIR>) -> bool {
    let mut entries: Vec<(&str, &str)> = Vec::new();
    for (location, props) in groups.named() {
        entries.extend(props.iter().map(|p| (p.name.as_str(), location)));
    }
    if let Some(body) = body {
        entries.extend(body.names().into_iter().map(|name| (name, "body")));
    }

    entries.iter().enumerate().any(|(i, (name, location))| {
        entries[..i]
            .iter()
            .any(|(n, l)| n == name && l != location)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::openapi::ir::emit::Emit;
    use serde_json::{Value, json};

    fn build(doc: &Value, op: Value, options: &GeneratorOptions) -> (Option<RequestIR>, Vec<Diagnostic>) {
        let op: Operation = serde_json::from_value(op).unwrap();
        RequestBuilder::new("Op", Resolver::new(doc), options)
            .build(&op, None)
            .unwrap()
    }

    fn emitted(op: Value) -> String {
        let (request, _) = build(&json!({}), op, &GeneratorOptions::default());
        request.unwrap().type_def.emit()
    }

    #[test]
    fn test_flat_merges_params_and_body_fields() {
        let out = emitted(json!({
            "parameters": [
                { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } },
                { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
            ],
            "requestBody": {
                "required": true,
                "content": { "application/json": { "schema": {
                    "type": "object",
                    "required": ["name"],
                    "properties": { "name": { "type": "string" }, "tag": { "type": "string" } }
                } } }
            },
            "responses": {}
        }));
        assert_eq!(
            out,
            "export interface OpRequest {\n  'id': string;\n  'verbose'?: boolean;\n  'name': string;\n  'tag'?: string;\n}\n"
        );
    }

    #[test]
    fn test_multipart_overrides_json() {
        let out = emitted(json!({
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": { "schema": { "type": "object", "properties": { "name": { "type": "string" } } } },
                    "multipart/form-data": { "schema": { "type": "object", "properties": { "file": { "type": "string", "format": "binary" } } } }
                }
            },
            "responses": {}
        }));
        assert!(out.contains("'body': FormData;"), "{out}");
        assert!(!out.contains("'name'"), "{out}");
    }

    #[test]
    fn test_unsupported_content_type_omitted() {
        let (request, _) = build(
            &json!({}),
            json!({
                "requestBody": { "content": { "application/xml": { "schema": { "type": "object" } } } },
                "responses": {}
            }),
            &GeneratorOptions::default(),
        );
        assert!(request.is_none());
    }

    #[test]
    fn test_duplicate_across_groups_forces_full_mode() {
        let (request, _) = build(
            &json!({}),
            json!({
                "parameters": [
                    { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } },
                    { "name": "id", "in": "query", "schema": { "type": "integer" } }
                ],
                "responses": {}
            }),
            &GeneratorOptions::default(),
        );
        let request = request.unwrap();
        assert_eq!(request.mode, RequestMode::Full);
        assert_eq!(
            request.type_def.emit(),
            "export interface OpRequest {\n  'path': { 'id': string };\n  'query'?: { 'id'?: number };\n}\n"
        );
    }

    #[test]
    fn test_array_body_with_params_forces_full_mode() {
        let (request, _) = build(
            &json!({}),
            json!({
                "parameters": [
                    { "name": "dryRun", "in": "query", "schema": { "type": "boolean" } }
                ],
                "requestBody": {
                    "required": true,
                    "content": { "application/json": { "schema": { "type": "array", "items": { "type": "string" } } } }
                },
                "responses": {}
            }),
            &GeneratorOptions::default(),
        );
        let request = request.unwrap();
        assert_eq!(request.mode, RequestMode::Full);
        let out = request.type_def.emit();
        assert!(out.contains("'body': Array<string>;"), "{out}");
        assert!(out.contains("'query'?: { 'dryRun'?: boolean };"), "{out}");
    }

    #[test]
    fn test_array_body_with_headers_only_stays_flat() {
        let (request, _) = build(
            &json!({}),
            json!({
                "parameters": [
                    { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
                ],
                "requestBody": {
                    "required": true,
                    "content": { "application/json": { "schema": { "type": "array", "items": { "type": "string" } } } }
                },
                "responses": {}
            }),
            &GeneratorOptions::default(),
        );
        let request = request.unwrap();
        assert_eq!(request.mode, RequestMode::Flat);
        let out = request.type_def.emit();
        assert!(out.contains("'X-Trace'?: string"), "{out}");
        assert!(out.contains("Array<string>"), "{out}");
        assert!(!out.contains("'body'"), "{out}");
    }

    #[test]
    fn test_array_body_alone_is_the_request_type() {
        let out = emitted(json!({
            "requestBody": {
                "content": { "application/json": { "schema": { "type": "array", "items": { "type": "integer" } } } }
            },
            "responses": {}
        }));
        assert_eq!(out, "export type OpRequest = Array<number>;\n");
    }

    #[test]
    fn test_explicit_full_request() {
        let options = GeneratorOptions {
            full_request: true,
            ..GeneratorOptions::default()
        };
        let (request, _) = build(
            &json!({}),
            json!({
                "parameters": [
                    { "name": "X-Trace", "in": "header", "required": true, "schema": { "type": "string" } }
                ],
                "requestBody": {
                    "content": { "application/json": { "schema": {
                        "type": "object", "properties": { "note": { "type": "string" } }
                    } } }
                },
                "responses": {}
            }),
            &options,
        );
        let out = request.unwrap().type_def.emit();
        assert_eq!(
            out,
            "export interface OpRequest {\n  'body'?: { 'note'?: string };\n  'headers': { 'X-Trace': string };\n}\n"
        );
    }

    #[test]
    fn test_allow_listed_header_forced_optional() {
        let out = emitted(json!({
            "parameters": [
                { "name": "authorization", "in": "header", "required": true, "schema": { "type": "string" } },
                { "name": "X-Tenant", "in": "header", "required": true, "schema": { "type": "string" } }
            ],
            "responses": {}
        }));
        assert!(out.contains("'authorization'?: string;"), "{out}");
        assert!(out.contains("'X-Tenant': string;"), "{out}");
    }

    #[test]
    fn test_within_group_duplicate_first_wins_with_diagnostic() {
        let (request, diagnostics) = build(
            &json!({}),
            json!({
                "parameters": [
                    { "name": "limit", "in": "query", "schema": { "type": "integer" } },
                    { "name": "limit", "in": "query", "schema": { "type": "string" } }
                ],
                "responses": {}
            }),
            &GeneratorOptions::default(),
        );
        let out = request.unwrap().type_def.emit();
        assert_eq!(out, "export interface OpRequest {\n  'limit'?: number;\n}\n");
        assert_eq!(
            diagnostics,
            vec![Diagnostic::ShadowedProperty {
                operation: "Op".into(),
                property: "limit".into(),
                location: "query".into(),
            }]
        );
    }

    #[test]
    fn test_body_field_clashing_with_param_forces_full_mode() {
        let (request, diagnostics) = build(
            &json!({}),
            json!({
                "parameters": [
                    { "name": "name", "in": "query", "schema": { "type": "string" } }
                ],
                "requestBody": {
                    "content": { "application/json": { "schema": {
                        "type": "object", "properties": { "name": { "type": "string" } }
                    } } }
                },
                "responses": {}
            }),
            &GeneratorOptions::default(),
        );
        assert_eq!(request.unwrap().mode, RequestMode::Full);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unsupported_body_type() {
        let op: Operation = serde_json::from_value(json!({
            "requestBody": {
                "content": { "application/json": { "schema": { "type": "file" } } }
            },
            "responses": {}
        }))
        .unwrap();
        let doc = json!({});
        let options = GeneratorOptions::default();
        let err = RequestBuilder::new("Upload", Resolver::new(&doc), &options)
            .build(&op, None)
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::TypeNotSupported { ref schema_type, .. } if schema_type == "file"
        ));
    }

    #[test]
    fn test_no_input_means_no_request_type() {
        let (request, _) = build(&json!({}), json!({ "responses": {} }), &GeneratorOptions::default());
        assert!(request.is_none());
    }

    #[test]
    fn test_path_level_params_and_refs() {
        let doc = json!({
            "components": {
                "parameters": {
                    "PetId": { "name": "petId", "in": "path", "required": true, "schema": { "type": "integer" } }
                },
                "requestBodies": {
                    "PetBody": {
                        "required": true,
                        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
                    }
                },
                "schemas": {
                    "Pet": { "type": "object", "required": ["name"], "properties": { "name": { "type": "string" } } }
                }
            }
        });
        let op: Operation = serde_json::from_value(json!({
            "parameters": [
                { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
            ],
            "requestBody": { "$ref": "#/components/requestBodies/PetBody" },
            "responses": {}
        }))
        .unwrap();
        let path_params: Vec<Parameter> = serde_json::from_value(json!([
            { "$ref": "#/components/parameters/PetId" },
            { "name": "X-Version", "in": "header", "schema": { "type": "string" } }
        ]))
        .unwrap();
        let options = GeneratorOptions::default();
        let (request, diagnostics) = RequestBuilder::new("UpdatePet", Resolver::new(&doc), &options)
            .build(&op, Some(&path_params))
            .unwrap();
        let out = request.unwrap().type_def.emit();
        assert_eq!(
            out,
            "export interface UpdatePetRequest {\n  'petId': string;\n  'X-Version'?: string;\n  'name': string;\n}\n"
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_swagger2_body_parameter() {
        let out = emitted(json!({
            "parameters": [
                { "name": "payload", "in": "body", "required": true, "schema": {
                    "type": "object", "required": ["title"], "properties": { "title": { "type": "string" } }
                } },
                { "name": "session", "in": "cookie", "schema": { "type": "string" } }
            ],
            "responses": {}
        }));
        assert_eq!(out, "export interface OpRequest {\n  'title': string;\n}\n");
    }

    #[test]
    fn test_date_params_accept_date_objects() {
        let out = emitted(json!({
            "parameters": [
                { "name": "since", "in": "query", "schema": { "type": "string", "format": "date" } }
            ],
            "responses": {}
        }));
        assert!(out.contains("'since'?: string | Date;"), "{out}");
    }
}
