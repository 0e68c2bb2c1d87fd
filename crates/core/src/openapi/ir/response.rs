//! Response declarations.
//!
//! Every declared status code gets an alias; the operation's response union
//! lists those aliases in the order the responses map declares them. When an
//! operation cannot be described by its bodies alone (several success codes,
//! bodies of unknown shape, or the caller asked for it) every member is
//! wrapped in the `FullResponse` envelope.

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::api::ResponsesIR;
use super::synthesize::{Synthesizer, Usage};
use super::types::{TsLiteral, TsPrimitive, TsType, TsTypeDef, TypeDefKind};
use super::utils::{pascal_case, reason_phrase};
use crate::error::GenerateResult;
use crate::openapi::resolve::Resolver;
use crate::openapi::spec::{MediaType, Response};

/// Name of the envelope type wrapping bodies in full-response mode.
pub const FULL_RESPONSE: &str = "FullResponse";
/// Name of the marker type standing in for a range of status codes.
pub const STATUS_RANGE: &str = "StatusRange";

/// A key of an operation's `responses` map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    /// `200`, `404`, ...
    Exact(u16),
    /// `2XX`, stored as its leading digit
    Range(u8),
    Default,
    Other(String),
}

impl StatusCode {
    pub fn parse(key: &str) -> Self {
        if key.eq_ignore_ascii_case("default") {
            return StatusCode::Default;
        }
        if let Ok(code) = key.parse::<u16>() {
            return StatusCode::Exact(code);
        }
        let bytes = key.as_bytes();
        if bytes.len() == 3
            && (b'1'..=b'5').contains(&bytes[0])
            && bytes[1..].iter().all(|b| b.eq_ignore_ascii_case(&b'x'))
        {
            return StatusCode::Range(bytes[0] - b'0');
        }
        StatusCode::Other(key.to_string())
    }

    pub fn is_success(&self) -> bool {
        match self {
            StatusCode::Exact(code) => (200..300).contains(code),
            StatusCode::Range(class) => *class == 2,
            StatusCode::Default | StatusCode::Other(_) => false,
        }
    }

    /// Per-status alias name for an operation.
    pub fn alias_name(&self, operation: &str) -> String {
        match self {
            StatusCode::Exact(code) => match reason_phrase(*code) {
                Some(reason) => format!("{operation}Response{}", pascal_case(reason)),
                None => format!("{operation}{code}Response"),
            },
            StatusCode::Range(class) => format!("{operation}{class}XXResponse"),
            StatusCode::Default => format!("{operation}DefaultResponse"),
            StatusCode::Other(key) => format!("{operation}{}Response", pascal_case(key)),
        }
    }

    /// Type of the envelope's `statusCode` field.
    pub fn status_type(&self) -> TsType {
        match self {
            StatusCode::Exact(code) => TsType::Literal(TsLiteral::Int(i64::from(*code))),
            StatusCode::Range(class) => TsType::Generic {
                name: STATUS_RANGE.into(),
                args: vec![TsType::Literal(TsLiteral::Int(i64::from(*class)))],
            },
            StatusCode::Default | StatusCode::Other(_) => TsType::Primitive(TsPrimitive::Number),
        }
    }
}

/// Response content type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseContentType {
    Json,
    Text,
    Blob,
    Unknown,
}

/// Classify a media type into the body kinds a client can decode.
pub fn detect_response_content_type(media_type: &str) -> ResponseContentType {
    let media_type = media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
        .to_ascii_lowercase();
    if media_type == "application/json" || media_type.ends_with("+json") {
        ResponseContentType::Json
    } else if media_type.starts_with("text/")
        || media_type == "application/xml"
        || media_type.ends_with("+xml")
    {
        ResponseContentType::Text
    } else if media_type == "application/octet-stream"
        || media_type.starts_with("image/")
        || media_type.starts_with("audio/")
        || media_type.starts_with("video/")
        || media_type == "application/pdf"
    {
        ResponseContentType::Blob
    } else {
        ResponseContentType::Unknown
    }
}

/// One status code's body before the envelope decision.
#[derive(Debug)]
struct StatusBody {
    status: StatusCode,
    body: TsType,
}

/// Builds the per-status aliases and the response union of one operation.
#[derive(Debug)]
pub struct ResponseBuilder<'a> {
    operation_name: &'a str,
    resolver: Resolver<'a>,
    synthesizer: Synthesizer<'a>,
    force_full: bool,
}

impl<'a> ResponseBuilder<'a> {
    pub fn new(operation_name: &'a str, resolver: Resolver<'a>, full_response: bool) -> Self {
        Self {
            operation_name,
            resolver,
            synthesizer: Synthesizer::new(resolver, Usage::Response),
            force_full: full_response,
        }
    }

    pub fn build(mut self, responses: &IndexMap<String, Response>) -> GenerateResult<ResponsesIR> {
        let mut bodies = Vec::with_capacity(responses.len());
        for (key, response) in responses {
            let status = StatusCode::parse(key);
            let response = self.resolver.deref(response)?;
            let body = self.body_type(&status, &response)?;
            bodies.push(StatusBody { status, body });
        }

        let success_count = bodies.iter().filter(|b| b.status.is_success()).count();
        if success_count > 1 {
            trace!(
                operation = %self.operation_name,
                success_count,
                "Several success statuses, using full responses."
            );
            self.force_full = true;
        }
        let full_response = self.force_full;

        let mut uses_status_range = false;
        let aliases: Vec<TsTypeDef> = bodies
            .into_iter()
            .map(|StatusBody { status, body }| {
                let ty = if full_response {
                    uses_status_range |= matches!(status, StatusCode::Range(_));
                    full_response_of(body, status.status_type())
                } else {
                    body
                };
                TsTypeDef::alias(status.alias_name(self.operation_name), ty)
            })
            .collect();

        let union_name = format!("{}Responses", self.operation_name);
        let union = if aliases.is_empty() {
            TsTypeDef::alias(
                union_name,
                full_response_of(TsType::unknown(), TsType::Literal(TsLiteral::Int(200))),
            )
        } else {
            TsTypeDef {
                name: union_name,
                type_params: vec![],
                kind: TypeDefKind::UnionAlias {
                    members: aliases.iter().map(|a| a.name.clone()).collect(),
                },
            }
        };

        debug!(
            operation = %self.operation_name,
            statuses = aliases.len(),
            full_response,
            "Built response types."
        );
        Ok(ResponsesIR {
            aliases,
            union,
            full_response,
            uses_status_range,
        })
    }

    /// Body type for one status, forcing the envelope when the shape is unknown.
    fn body_type(&mut self, status: &StatusCode, response: &Response) -> GenerateResult<TsType> {
        let first = response.content.as_ref().and_then(|c| c.first());
        let Some((media_type, content)) = first else {
            if *status == StatusCode::Exact(204) {
                return Ok(TsType::Primitive(TsPrimitive::Undefined));
            }
            trace!(
                operation = %self.operation_name,
                status = ?status,
                "Response without content, using full responses."
            );
            self.force_full = true;
            return Ok(TsType::unknown());
        };

        match detect_response_content_type(media_type) {
            ResponseContentType::Json => self.json_body(content),
            ResponseContentType::Text => Ok(TsType::string()),
            ResponseContentType::Blob => Ok(TsType::Ref("Blob".into())),
            ResponseContentType::Unknown => {
                trace!(
                    operation = %self.operation_name,
                    media_type = %media_type,
                    "Unrecognized response content type, using full responses."
                );
                self.force_full = true;
                Ok(TsType::string())
            }
        }
    }

    fn json_body(&mut self, content: &MediaType) -> GenerateResult<TsType> {
        match &content.schema {
            Some(schema) => self.synthesizer.synthesize(schema),
            None => Ok(TsType::unknown()),
        }
    }
}

fn full_response_of(body: TsType, status: TsType) -> TsType {
    TsType::Generic {
        name: FULL_RESPONSE.into(),
        args: vec![body, status],
    }
}
