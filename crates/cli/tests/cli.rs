//! Runs the built `clientgen` binary against documents on disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const OPENAPI_JSON: &str = r##"{
  "openapi": "3.0.3",
  "paths": {
    "/orders/{orderId}": {
      "get": {
        "operationId": "getOrder",
        "parameters": [
          { "name": "orderId", "in": "path", "required": true, "schema": { "type": "string" } },
          { "name": "expand", "in": "query", "schema": { "type": "boolean" } },
          { "name": "expand", "in": "query", "schema": { "type": "string" } }
        ],
        "responses": {
          "200": { "description": "OK", "content": { "application/json": { "schema": {
            "type": "object", "required": ["id"], "properties": { "id": { "type": "string" } }
          } } } }
        }
      }
    }
  }
}"##;

const INTROSPECTION_JSON: &str = r##"{
  "data": { "__schema": { "types": [
    { "kind": "OBJECT", "name": "Order", "fields": [
      { "name": "id", "type": { "kind": "SCALAR", "name": "ID", "ofType": null } }
    ] }
  ] } }
}"##;

fn clientgen(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_clientgen"))
        .args(args)
        .current_dir(dir)
        .env_remove("CLIENTGEN_LOG")
        .output()
        .expect("Failed to run clientgen")
}

fn write(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).expect("Failed to write fixture");
}

#[test]
fn test_openapi_to_stdout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "api.json", OPENAPI_JSON);

    let output = clientgen(&["api.json"], dir.path());
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains(
            "export interface GetOrderRequest {\n  'orderId': string;\n  'expand'?: boolean;\n}\n"
        ),
        "{stdout}"
    );
    assert!(
        stdout.contains("  getOrder(request: GetOrderRequest): Promise<GetOrderResponses>;\n"),
        "{stdout}"
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("warning: GetOrder: query property 'expand' is shadowed"),
        "{stderr}"
    );
}

#[test]
fn test_config_file_and_output_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "api.json", OPENAPI_JSON);
    write(
        &dir,
        "clientgen.toml",
        "full-response = true\nclient-name = \"Orders\"\n",
    );

    let output = clientgen(
        &["api.json", "--config", "clientgen.toml", "--full-request", "-o", "api.ts"],
        dir.path(),
    );
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(dir.path().join("api.ts")).unwrap();
    assert!(
        written.contains("export type GetOrderResponseOK = FullResponse<{ 'id': string }, 200>;\n"),
        "{written}"
    );
    assert!(written.contains("  'path': { 'orderId': string };\n"), "{written}");
    assert!(written.contains("export interface Orders {\n"), "{written}");
}

#[test]
fn test_graphql_input() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "schema.json", INTROSPECTION_JSON);

    let output = clientgen(&["schema.json", "--graphql"], dir.path());
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.starts_with("export interface Order {\n  'id'?: string;\n}\n"),
        "{stdout}"
    );
    assert!(stdout.contains("export interface GraphQLClient {\n"), "{stdout}");
}

#[test]
fn test_generation_error_exits_nonzero() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(
        &dir,
        "api.json",
        r#"{ "paths": { "/x": { "get": { "operationId": "getX" } } } }"#,
    );

    let output = clientgen(&["api.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("operation GetX has no responses"), "{stderr}");
}

#[test]
fn test_bad_config_key_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write(&dir, "api.json", OPENAPI_JSON);
    write(&dir, "clientgen.toml", "full-responses = true\n");

    let output = clientgen(&["api.json", "--config", "clientgen.toml"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = clientgen(&["nope.json"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read nope.json"), "{stderr}");
}
