//! Normalization from OpenAPI document to API IR.
//!
//! This module handles the document-level walk:
//! - Operation discovery and naming
//! - Up-front rejection of operations without responses
//! - Per-operation request and response synthesis, in parallel

use std::collections::HashSet;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use super::api::{ApiIR, OperationIR};
use super::request::RequestBuilder;
use super::response::ResponseBuilder;
use super::utils::{lowercase_first, pascal_case, sanitize_ts_identifier};
use crate::config::GeneratorOptions;
use crate::error::{GenerateError, GenerateResult};
use crate::openapi::resolve::Resolver;
use crate::openapi::spec::{OpenApiSpec, Operation, Parameter, Response};

/// An operation that passed the document-level checks.
struct PendingOperation<'a> {
    name: String,
    operation: &'a Operation,
    responses: &'a IndexMap<String, Response>,
    path_params: Option<&'a [Parameter]>,
}

/// Normalize an OpenAPI document into API IR
pub fn normalize_spec(document: &Value, options: &GeneratorOptions) -> GenerateResult<ApiIR> {
    let spec = OpenApiSpec::from_value(document)?;
    let pending = collect_operations(&spec)?;
    debug!(operations = pending.len(), "Collected operations.");

    let resolver = Resolver::new(document);
    let results: Vec<_> = pending
        .par_iter()
        .map(|op| normalize_operation(op, resolver, options))
        .collect();
    // Report the first failure in document order, whichever thread hit it.
    let operations = results.into_iter().collect::<GenerateResult<Vec<_>>>()?;

    Ok(ApiIR { operations })
}

/// Walk `paths` in declaration order, naming operations and checking them
/// before any type is synthesized.
fn collect_operations(spec: &OpenApiSpec) -> GenerateResult<Vec<PendingOperation<'_>>> {
    let mut pending = Vec::new();
    let mut names = HashSet::new();

    for (path, item) in &spec.paths {
        let path_params = item.parameters.as_deref();
        for (method, operation) in item.operations() {
            let name = operation_name(path, method, operation);
            let Some(responses) = &operation.responses else {
                return Err(GenerateError::MissingResponses { operation: name });
            };
            if !names.insert(name.clone()) {
                return Err(GenerateError::DuplicateOperation { name });
            }
            pending.push(PendingOperation {
                name,
                operation,
                responses,
                path_params,
            });
        }
    }

    Ok(pending)
}

fn normalize_operation(
    pending: &PendingOperation<'_>,
    resolver: Resolver<'_>,
    options: &GeneratorOptions,
) -> GenerateResult<OperationIR> {
    let name = pending.name.as_str();
    debug!(operation = %name, "Normalizing operation.");

    let (request, diagnostics) = RequestBuilder::new(name, resolver, options)
        .build(pending.operation, pending.path_params)?;
    let responses =
        ResponseBuilder::new(name, resolver, options.full_response).build(pending.responses)?;

    Ok(OperationIR {
        name: pending.name.clone(),
        method_name: sanitize_ts_identifier(&lowercase_first(name)),
        request,
        responses,
        diagnostics,
    })
}

/// PascalCase operation name: from `operationId`, else from method and path.
fn operation_name(path: &str, method: &str, op: &Operation) -> String {
    let name = match &op.operation_id {
        Some(id) => pascal_case(id),
        None => {
            let segments: Vec<_> = path
                .split('/')
                .map(|s| s.trim_start_matches('{').trim_end_matches('}'))
                .filter(|s| !s.is_empty())
                .collect();
            pascal_case(&format!("{method} {}", segments.join(" ")))
        }
    };
    if name.is_empty() {
        pascal_case(method)
    } else {
        name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(value: Value) -> Operation {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_operation_name_from_id() {
        let o = op(json!({ "operationId": "listPets" }));
        assert_eq!(operation_name("/pets", "get", &o), "ListPets");
        let o = op(json!({ "operationId": "pets.find-by_tag" }));
        assert_eq!(operation_name("/pets", "get", &o), "PetsFindByTag");
    }

    #[test]
    fn test_operation_name_from_path() {
        let o = op(json!({}));
        assert_eq!(operation_name("/pets/{petId}", "get", &o), "GetPetsPetId");
        assert_eq!(operation_name("/", "post", &o), "Post");
    }

    #[test]
    fn test_missing_responses_rejected_before_synthesis() {
        // The request body would fail synthesis; the missing responses must win.
        let doc = json!({
            "paths": {
                "/pets": {
                    "post": {
                        "operationId": "addPet",
                        "requestBody": { "content": { "application/json": { "schema": { "$ref": "#/nowhere" } } } }
                    }
                }
            }
        });
        let err = normalize_spec(&doc, &GeneratorOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::MissingResponses { ref operation } if operation == "AddPet"
        ));
    }

    #[test]
    fn test_first_failing_operation_is_reported() {
        let mut paths = serde_json::Map::new();
        paths.insert(
            "/first".into(),
            json!({ "post": {
                "operationId": "first",
                "requestBody": { "content": { "application/json": { "schema": { "type": "file" } } } },
                "responses": {}
            } }),
        );
        for i in 0..32 {
            paths.insert(
                format!("/later{i}"),
                json!({ "get": {
                    "operationId": format!("later{i}"),
                    "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/nowhere" } } } } }
                } }),
            );
        }
        let doc = json!({ "paths": paths });

        for _ in 0..8 {
            let err = normalize_spec(&doc, &GeneratorOptions::default()).unwrap_err();
            assert!(
                matches!(err, GenerateError::TypeNotSupported { ref operation, .. } if operation == "First"),
                "{err}"
            );
        }
    }

    #[test]
    fn test_duplicate_operation_names() {
        let doc = json!({
            "paths": {
                "/a": { "get": { "operationId": "fetch_item", "responses": {} } },
                "/b": { "get": { "operationId": "fetchItem", "responses": {} } }
            }
        });
        let err = normalize_spec(&doc, &GeneratorOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::DuplicateOperation { ref name } if name == "FetchItem"
        ));
    }

    #[test]
    fn test_operations_keep_document_order() {
        let doc = json!({
            "paths": {
                "/zebras": { "get": { "operationId": "listZebras", "responses": {} } },
                "/ants": {
                    "post": { "operationId": "addAnt", "responses": {} },
                    "get": { "operationId": "listAnts", "responses": {} }
                }
            }
        });
        let api = normalize_spec(&doc, &GeneratorOptions::default()).unwrap();
        let names: Vec<_> = api.operations.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["ListZebras", "ListAnts", "AddAnt"]);
        assert_eq!(api.operations[0].method_name, "listZebras");
    }

    #[test]
    fn test_reserved_method_name_is_escaped() {
        let doc = json!({
            "paths": {
                "/items/{id}": { "delete": { "operationId": "delete", "responses": { "204": {} } } }
            }
        });
        let api = normalize_spec(&doc, &GeneratorOptions::default()).unwrap();
        assert_eq!(api.operations[0].name, "Delete");
        assert_eq!(api.operations[0].method_name, "_delete");
    }
}
