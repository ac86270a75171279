//! Error types for provider schema loading and translation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during translation of a provider schema into CUE.
///
/// Every variant is fatal for the current run: translation stops at the first
/// error and no partial output is produced.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("provider \"{address}\" not found in schema (available: {})", available.join(", "))]
    NotFound {
        address: String,
        available: Vec<String>,
    },

    #[error("attribute {attribute} of {entity} is ambiguous: {reason}")]
    AmbiguousAttribute {
        entity: String,
        attribute: String,
        reason: &'static str,
    },

    #[error("attribute {attribute} of {entity} has an invalid type: {value}")]
    InvalidType {
        entity: String,
        attribute: String,
        value: String,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed provider schema: {message}")]
    MalformedInput { message: String },
}

impl TranslateError {
    /// Returns true if the input document itself could not be understood.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            TranslateError::InvalidJson { .. } | TranslateError::MalformedInput { .. }
        )
    }

    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while reading a provider schema from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        3
    }
}

/// Single input-shape error with path context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SchemaError {
    /// JSON Pointer (RFC 6901) to the offending value.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
