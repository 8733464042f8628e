/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes, nested under `/api`
 * 2. Uploaded files, served read-only under `/uploads`
 * 3. Fallback handler (JSON 404)
 *
 * Request tracing and CORS wrap everything.
 */

use axum::{http::StatusCode, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::auth::uploads::PUBLIC_UPLOAD_PREFIX;
use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

async fn route_not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Route not found")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the pool, auth service and config
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let api = configure_api_routes(Router::new(), &app_state);
    let uploads = ServeDir::new(app_state.config.upload_dir.clone());

    Router::new()
        .nest("/api", api)
        .nest_service(PUBLIC_UPLOAD_PREFIX, uploads)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
