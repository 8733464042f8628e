/**
 * Application State Management
 *
 * This module defines the application state shared by handlers and the
 * access guard middleware.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The `AuthService` (connection pool, hasher, token issuer/verifier,
 *   upload store)
 * - The loaded `ServerConfig`
 *
 * Nothing here is mutated after startup. Cloning is cheap: the service is
 * reference counted and the config sits behind an `Arc`.
 */

use std::sync::Arc;

use crate::backend::auth::AuthService;
use crate::backend::server::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and verification flows
    pub auth: AuthService,

    /// Configuration the server was started with
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(auth: AuthService, config: ServerConfig) -> Self {
        Self {
            auth,
            config: Arc::new(config),
        }
    }

    /// Whether internal error detail is included in responses
    pub fn expose_error_details(&self) -> bool {
        self.config.expose_error_details()
    }
}
