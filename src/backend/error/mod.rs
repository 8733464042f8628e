//! Backend Error Module
//!
//! This module defines the error type returned at the HTTP boundary.
//! Every failure leaving a handler or middleware becomes a JSON body with
//! `success: false` and a public message.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and per-flow fallback messages
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Request-level failures with an explicit status
//! - `Auth` - Authentication core failures
//! - `InternalError` - Unexpected failures, detail hidden outside development

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ErrorBody;
pub use types::{BackendError, LOGIN_FAILED_MESSAGE, REGISTRATION_FAILED_MESSAGE};
