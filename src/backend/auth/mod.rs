//! Authentication Module
//!
//! This module handles account registration, login and identity
//! verification for both marketplace roles.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and the hash-once `Secret` type
//! - **`sessions`** - JWT issuance and verification
//! - **`users`** - Identity model and credential store operations
//! - **`profiles`** - Client and freelancer profile records
//! - **`uploads`** - Freelancer file validation and disk storage
//! - **`service`** - Registration, login and profile flows
//! - **`error`** - Authentication error taxonomy
//! - **`handlers`** - HTTP handlers for the authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── error.rs        - AuthError
//! ├── password.rs     - PasswordHasher, PasswordHash, Secret
//! ├── sessions.rs     - TokenIssuer, TokenVerifier, Claims
//! ├── users.rs        - Identity and store operations
//! ├── profiles.rs     - RoleProfile and store operations
//! ├── uploads.rs      - Upload allow-lists and UploadStore
//! ├── service.rs      - AuthService flows
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - Client and freelancer registration
//!     ├── login.rs    - Login
//!     └── profile.rs  - Current account profile
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: fields validated → identity + profile written in one
//!    transaction → JWT returned
//! 2. **Login**: identity looked up by email and role → password verified →
//!    last login stamped → JWT and profile returned
//! 3. **Profile**: JWT verified → identity resolved → profile merged
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage and never serialized
//! - Tokens are HS256 JWTs valid for 7 days, with no server-side sessions
//! - Unknown email, wrong password and wrong role all fail identically
//! - Every token failure is reported as the same 401

/// Authentication error taxonomy
pub mod error;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// Identity model and database operations
pub mod users;

/// Role profile model and database operations
pub mod profiles;

/// Freelancer upload validation and storage
pub mod uploads;

/// Registration, login and profile flows
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use error::AuthError;
pub use service::{AuthService, AuthenticatedUser};
pub use handlers::types::{
    AuthResponse, LoginRequest, ProfileResponse, RegisterClientRequest, UserResponse,
};
pub use handlers::{get_profile, login, register_client, register_freelancer};
