//! Utility functions for declaration generation.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::types::TsLiteral;
use crate::openapi::spec::EnumValue;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Escape a string for use inside a single-quoted TypeScript string.
/// Escapes backslashes and single quotes.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Wrap a string in single quotes, escaping as needed.
pub fn single_quote(s: &str) -> String {
    format!("'{}'", escape_single_quoted(s))
}

/// Sanitize an identifier to be a valid TypeScript identifier.
/// - Replaces `-`, `.`, ` ` with separators and converts to camelCase
/// - Prepends `_` if starts with digit
/// - Escapes reserved words with `_` prefix
pub fn sanitize_ts_identifier(name: &str) -> String {
    if name.is_empty() {
        return "_empty".to_string();
    }

    let parts: Vec<&str> = name.split(['-', '.', ' ']).collect();

    let mut result = String::new();
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 || result.is_empty() {
            result.push_str(part);
        } else {
            result.push_str(&capitalize_first(part));
        }
    }

    result.retain(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result = format!("_{result}");
    }

    result
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Convert arbitrary text to a PascalCase type name.
///
/// Apostrophes are dropped, every other non-alphanumeric character splits
/// words, and the first letter of each word is uppercased while the rest is
/// kept as written (`"Non-Authoritative Information"` becomes
/// `NonAuthoritativeInformation`, `"OK"` stays `OK`).
pub fn pascal_case(s: &str) -> String {
    let cleaned: String = s.chars().filter(|c| *c != '\'').collect();
    let mut result: String = cleaned
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(capitalize_first)
        .collect();
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result = format!("_{result}");
    }
    result
}

/// Standard reason phrase for an HTTP status code.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    let phrase = match code {
        100 => "Continue",
        101 => "Switching Protocols",
        102 => "Processing",
        103 => "Early Hints",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        203 => "Non-Authoritative Information",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",
        207 => "Multi-Status",
        208 => "Already Reported",
        226 => "IM Used",
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",
        418 => "I'm a teapot",
        421 => "Misdirected Request",
        422 => "Unprocessable Entity",
        423 => "Locked",
        424 => "Failed Dependency",
        425 => "Too Early",
        426 => "Upgrade Required",
        428 => "Precondition Required",
        429 => "Too Many Requests",
        431 => "Request Header Fields Too Large",
        451 => "Unavailable For Legal Reasons",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        506 => "Variant Also Negotiates",
        507 => "Insufficient Storage",
        508 => "Loop Detected",
        510 => "Not Extended",
        511 => "Network Authentication Required",
        _ => return None,
    };
    Some(phrase)
}

/// Convert an OpenAPI enum value to a TypeScript literal.
///
/// With `string_typed` set every value becomes a string literal, so that
/// `{ type: string, enum: [1, 2] }` yields `'1' | '2'`. Objects and arrays
/// have no literal form.
pub fn enum_value_to_literal(v: &EnumValue, string_typed: bool) -> Option<TsLiteral> {
    let literal = match v {
        EnumValue::String(s) => TsLiteral::String(s.clone()),
        EnumValue::Integer(n) if string_typed => TsLiteral::String(n.to_string()),
        EnumValue::Float(f) if string_typed => TsLiteral::String(f.to_string()),
        EnumValue::Bool(b) if string_typed => TsLiteral::String(b.to_string()),
        EnumValue::Integer(n) => TsLiteral::Int(*n),
        EnumValue::Float(f) => TsLiteral::Number(*f),
        EnumValue::Bool(b) => TsLiteral::Bool(*b),
        EnumValue::Null => TsLiteral::Null,
        EnumValue::Other(_) => return None,
    };
    Some(literal)
}

/// Convert a JSON value (from `const`) to a TypeScript literal.
pub fn json_value_to_literal(value: &serde_json::Value) -> Option<TsLiteral> {
    match value {
        serde_json::Value::Null => Some(TsLiteral::Null),
        serde_json::Value::Bool(b) => Some(TsLiteral::Bool(*b)),
        serde_json::Value::Number(n) => Some(match n.as_i64() {
            Some(i) => TsLiteral::Int(i),
            None => TsLiteral::Number(n.as_f64().unwrap_or(0.0)),
        }),
        serde_json::Value::String(s) => Some(TsLiteral::String(s.clone())),
        _ => None,
    }
}
