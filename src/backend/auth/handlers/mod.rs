//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the authentication endpoints.
//! Handlers are thin: they decode the body, call one `AuthService` flow and
//! shape the response.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - Client and freelancer registration
//! ├── login.rs    - User authentication handler
//! └── profile.rs  - Current account profile
//! ```
//!
//! # Handlers
//!
//! - **`register_client`** - POST /api/register/client
//! - **`register_freelancer`** - POST /api/register/freelancer (multipart)
//! - **`login`** - POST /api/login
//! - **`get_profile`** - GET /api/profile (behind the access guard)

/// Request and response types
pub mod types;

/// Registration handlers
pub mod register;

/// Login handler
pub mod login;

/// Profile handler
pub mod profile;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, LoginResponse, ProfileResponse, UserResponse};

// Re-export handlers
pub use login::login;
pub use profile::get_profile;
pub use register::{register_client, register_freelancer};
