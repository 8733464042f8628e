//! Shared Module
//!
//! This module contains types that appear on the wire between the
//! marketplace front-end and the backend. They carry no server-only state
//! and serialize with the camelCase / bucket spellings the front-end uses.

/// Account roles and profile buckets
pub mod role;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use role::{CompanySize, ExperienceLevel, Role};
pub use error::SharedError;
