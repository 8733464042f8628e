//! Common test utilities and helpers
//!
//! This module provides shared utilities for the integration tests:
//! - `TestApp`, the full router over an in-memory database
//! - Authentication request builders
//! - Assertion helpers for the JSON error body

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;

// Re-export commonly used utilities
pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
