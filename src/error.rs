//! Error types for registry and factory operations

use thiserror::Error;

use crate::element::SchemaViolation;

/// Main error type outside of node mutation
#[derive(Error, Debug)]
pub enum DocxError {
    /// A node or its subtree broke a descriptor whitelist
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    /// Descriptor without a tag name
    #[error("Descriptor tag name must not be empty")]
    EmptyTagName,

    /// Semantic name not present in the registry
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// IO error (schema directory loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error (schema files, element trees)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, DocxError>;
