//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - /api route table
//! ```
//!
//! # Route Types
//!
//! ## API Routes
//!
//! - `GET /api/test` - Liveness check
//! - `POST /api/register/client` - Client registration
//! - `POST /api/register/freelancer` - Freelancer registration with uploads
//! - `POST /api/login` - Login
//! - `GET /api/profile` - Current account (guarded)
//! - `GET /api/client/profile` - Client only
//! - `GET /api/freelancer/profile` - Freelancer only
//!
//! ## Static Files
//!
//! - `GET /uploads/<name>` - Stored freelancer uploads
//!
//! Anything else is a JSON 404.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
