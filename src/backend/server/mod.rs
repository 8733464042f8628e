//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure
//! - **`config`** - Configuration loading and the database pool
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState
//! ├── config.rs       - ServerConfig, connect_database
//! └── init.rs         - build_app, create_app
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, optional TOML file, environment
//! 2. **Database**: SQLite pool opened, migrations applied
//! 3. **Uploads**: upload directory created
//! 4. **Router Creation**: routes, guards and layers configured
//!
//! # Example
//!
//! ```rust,no_run
//! use freelance_hub::backend::server::create_app;
//!
//! # async fn example() {
//! let app = create_app().await.expect("server failed to start");
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, Environment, ServerConfig};
pub use init::{build_app, create_app, StartupError};
pub use state::AppState;
