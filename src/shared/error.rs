//! Shared Error Types
//!
//! Errors raised while parsing wire values into shared types. The backend
//! folds these into its validation failures.
//!
//! # Usage
//!
//! ```rust
//! use freelance_hub::shared::error::SharedError;
//!
//! let error = SharedError::validation("companySize", "Unknown company size");
//! ```
use thiserror::Error;

/// Shared error types that can occur while decoding request values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
