//! Error types for declaration generation.
//!
//! Every error is fatal for the whole document: generation is all-or-nothing
//! and no partial output is returned.

use thiserror::Error;

/// Result type alias for generation
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A GraphQL scalar or field kind, or a composition member shape, that has no mapping
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A body schema whose `type` cannot be expressed as a request shape
    #[error("type '{schema_type}' is not supported for the request body of {operation}")]
    TypeNotSupported {
        operation: String,
        schema_type: String,
    },

    /// Operation without a `responses` block
    #[error("operation {operation} has no responses")]
    MissingResponses { operation: String },

    /// `$ref` chain that leads back to a pointer already being expanded
    #[error("cyclic schema reference: {pointer}")]
    CyclicSchema { pointer: String },

    /// `$ref` pointer that does not resolve inside the document
    #[error("unresolved reference: {pointer}")]
    UnresolvedRef { pointer: String },

    /// Two operations that map onto the same generated name
    #[error("duplicate operation name '{name}'")]
    DuplicateOperation { name: String },

    /// The document (or a node inside it) does not have the expected shape
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Options file could not be parsed
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = GenerateError::UnknownType("Upload".into());
        assert_eq!(err.to_string(), "unknown type: Upload");

        let err = GenerateError::TypeNotSupported {
            operation: "UploadFile".into(),
            schema_type: "file".into(),
        };
        assert_eq!(
            err.to_string(),
            "type 'file' is not supported for the request body of UploadFile"
        );

        let err = GenerateError::CyclicSchema {
            pointer: "#/components/schemas/Node".into(),
        };
        assert!(err.to_string().contains("#/components/schemas/Node"));
    }
}
