//! Backend Module
//!
//! This module contains all server-side code for Freelance Hub. It provides
//! an Axum HTTP server exposing registration, login and profile endpoints
//! backed by a SQLite credential store.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, JWT tokens, credential store, flows
//! - **`middleware`** - Access guard and role gates
//! - **`error`** - HTTP error responses
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state and initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication core
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the database pool, the `AuthService` and the loaded
//! configuration. Nothing in it is mutated after startup; all mutable data
//! lives in the database, so concurrent requests never coordinate in
//! process.
//!
//! # Error Handling
//!
//! Every failure reaching the HTTP boundary is rendered as a JSON body of
//! the form `{"success": false, "message": "..."}` with a matching status
//! code. Token failures are deliberately indistinguishable from each other,
//! as are the login failures.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and account management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use server::{build_app, create_app};
pub use error::BackendError;
pub use auth::{AuthError, AuthService};
