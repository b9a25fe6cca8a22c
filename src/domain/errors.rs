//! Domain error types
//!
//! This module defines the error hierarchy for Strata. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Strata error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document-source / project-catalog capability errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Errors raised while exporting a document version to a format
    #[error("Export error: {0}")]
    Export(String),

    /// Errors raised while exporting a sketch to DXF
    #[error("Sketch export error: {0}")]
    Sketch(String),

    /// Errors raised while updating a metadata ledger
    #[error("Metadata ledger error: {0}")]
    Ledger(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Capability-specific errors
///
/// Errors that occur when talking to the externally supplied document
/// source or project catalog. These errors don't expose the concrete
/// adapter types behind the capability traits.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to open a document for a file version
    #[error("Failed to open document `{name}`: {reason}")]
    OpenFailed { name: String, reason: String },

    /// Failed to close an open document
    #[error("Failed to close document `{name}`: {reason}")]
    CloseFailed { name: String, reason: String },

    /// A document accessor was used before the handle was opened
    #[error("Document `{0}` is not open")]
    NotOpen(String),

    /// A handle was asked to reopen after it was closed
    #[error("Document handle for `{0}` was already closed")]
    AlreadyClosed(String),

    /// The project catalog could not be enumerated
    #[error("Project catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A file's version history could not be enumerated
    #[error("Failed to enumerate versions of `{0}`")]
    VersionsUnavailable(String),

    /// The capability rejected an export request
    #[error("Export rejected for `{path}`: {reason}")]
    ExportRejected { path: String, reason: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for StrataError {
    fn from(err: std::io::Error) -> Self {
        StrataError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StrataError {
    fn from(err: serde_json::Error) -> Self {
        StrataError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StrataError {
    fn from(err: toml::de::Error) -> Self {
        StrataError::Configuration(format!("TOML parse error: {err}"))
    }
}
