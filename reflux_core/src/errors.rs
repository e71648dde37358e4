//! # Error Types
//!
//! Structured error types for reflux_core. The design pipeline itself never
//! fails: ill-posed specifications come back as a degraded
//! [`DesignResult`](crate::calculations::distillation::DesignResult) with
//! `bad_specs` set. These errors cover the edges around it: parsing a
//! chemical system name, reading or writing files and rendering a datasheet.
//!
//! ## Example
//!
//! ```rust
//! use reflux_core::errors::{CalcError, CalcResult};
//!
//! fn parse_holdup(text: &str) -> CalcResult<f64> {
//!     text.trim().parse::<f64>().map_err(|_| {
//!         CalcError::invalid_input("drum_holdup_min", text, "Holdup must be a number of minutes")
//!     })
//! }
//!
//! assert!(parse_holdup("five").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for reflux_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for operations around the design engine.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid and cannot be coerced
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Chemical system name not found in the property packs
    #[error("Chemical system not found: {name}")]
    SystemNotFound { name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Typst compilation or PDF export failed
    #[error("Rendering failed during {stage}: {reason}")]
    RenderFailed { stage: String, reason: String },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SystemNotFound error
    pub fn system_not_found(name: impl Into<String>) -> Self {
        CalcError::SystemNotFound { name: name.into() }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create an Io error for `path`
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        CalcError::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::SystemNotFound { .. } => "SYSTEM_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::RenderFailed { .. } => "RENDER_FAILED",
            CalcError::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
