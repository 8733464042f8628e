//! Freelance Hub - Main Library
//!
//! Freelance Hub is the backend of a two-sided freelance marketplace. Clients
//! and freelancers register accounts, authenticate with JSON Web Tokens and
//! read back their role-specific profiles.
//!
//! # Overview
//!
//! This library provides:
//! - Account registration for clients (JSON) and freelancers (multipart, with
//!   optional profile picture and resume uploads)
//! - bcrypt password hashing with hash-once storage semantics
//! - JWT issuance and verification with a fixed 7 day validity window
//! - An access guard middleware and role gates for protected routes
//! - SQLite persistence through sqlx with embedded migrations
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared with clients
//!   - Roles, company-size and experience buckets
//!   - Field validation errors
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, router and configuration
//!   - Authentication flows, credential store, uploads
//!   - Access guard middleware and error responses
//!
//! # Usage
//!
//! ```rust,no_run
//! use freelance_hub::backend::server::{build_app, config::ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = build_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - `shared::SharedError` for field validation
//! - `backend::auth::AuthError` for the authentication taxonomy
//! - `backend::error::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
