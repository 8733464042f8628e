//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Access guard, role gates and the `AuthUser` extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use freelance_hub::backend::middleware::{auth_middleware, require_client};
//! use freelance_hub::backend::server::AppState;
//!
//! # fn example(state: AppState) -> Router<AppState> {
//! Router::new()
//!     .route("/client/profile", get(|| async { "ok" }))
//!     .route_layer(middleware::from_fn(require_client))
//!     .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! # }
//! ```

pub mod auth;

pub use auth::{
    auth_middleware, extract_authenticated_user, require_client, require_freelancer, AuthUser,
};
