//! # Error Types
//!
//! Structured error types for vouss_core. Only structural misuse is an error:
//! a bad configuration, a file that cannot be read or written, or a project
//! file from an incompatible schema. Numerical trouble inside a solve (a
//! buckled trial, a non-converging iteration) is reported inside the result,
//! never through this type.
//!
//! ## Example
//!
//! ```rust
//! use vouss_core::errors::{VoussoirError, VoussoirResult};
//!
//! fn validate_span(span_m: f64) -> VoussoirResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(VoussoirError::InvalidInput {
//!             field: "span_m".to_string(),
//!             value: span_m.to_string(),
//!             reason: "Span must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for vouss_core operations
pub type VoussoirResult<T> = Result<T, VoussoirError>;

/// Structured error type for voussoir analyses.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum VoussoirError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A named analysis was not found in a project
    #[error("Analysis not found: {label}")]
    AnalysisNotFound { label: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl VoussoirError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        VoussoirError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an AnalysisNotFound error
    pub fn analysis_not_found(label: impl Into<String>) -> Self {
        VoussoirError::AnalysisNotFound { label: label.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        VoussoirError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        VoussoirError::SerializationError { reason: reason.into() }
    }

    /// Whether the error comes from the analysis configuration rather than the environment
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, VoussoirError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            VoussoirError::InvalidInput { .. } => "INVALID_INPUT",
            VoussoirError::AnalysisNotFound { .. } => "ANALYSIS_NOT_FOUND",
            VoussoirError::FileError { .. } => "FILE_ERROR",
            VoussoirError::SerializationError { .. } => "SERIALIZATION_ERROR",
            VoussoirError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
