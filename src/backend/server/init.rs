/**
 * Server Initialization
 *
 * This module builds the Axum application from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Resolve the signing secret
 * 2. Open the database pool and run migrations
 * 3. Create the upload directory
 * 4. Build the `AuthService` and `AppState`
 * 5. Create and configure the router
 *
 * Any failure stops startup with a `StartupError`.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::uploads::UploadStore;
use crate::backend::auth::AuthService;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Errors that prevent the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database initialization failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("upload directory initialization failed: {0}")]
    Uploads(#[from] std::io::Error),
}

/// Build the application for `config`
///
/// # Arguments
///
/// * `config` - Loaded server configuration
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn build_app(config: ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing Freelance Hub backend ({:?})", config.environment);

    let jwt_secret = config.jwt_secret()?;

    let db_pool = connect_database(&config.database_url, config.max_connections).await?;

    let uploads = UploadStore::new(&config.upload_dir);
    uploads.ensure_dir().await.map_err(|e| {
        tracing::error!(
            "Failed to create upload directory {}: {:?}",
            config.upload_dir.display(),
            e
        );
        e
    })?;

    let auth = AuthService::new(
        db_pool,
        &jwt_secret,
        PasswordHasher::new(config.bcrypt_cost),
        uploads,
    );

    let app_state = AppState::new(auth, config);
    let app = create_router(app_state);

    tracing::info!("Router configured");

    Ok(app)
}

/// Build the application from the process environment
pub async fn create_app() -> Result<Router<()>, StartupError> {
    let config = ServerConfig::load()?;
    build_app(config).await
}
