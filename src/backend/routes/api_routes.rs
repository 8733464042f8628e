/**
 * API Route Handlers
 *
 * This module defines the `/api` route table.
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/test` - Liveness check
 * - `POST /api/register/client` - Client registration (JSON)
 * - `POST /api/register/freelancer` - Freelancer registration (multipart)
 * - `POST /api/login` - Login for either role
 *
 * ## Protected
 * - `GET /api/profile` - Current account (access guard)
 * - `GET /api/client/profile` - Access guard + client gate
 * - `GET /api/freelancer/profile` - Access guard + freelancer gate
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::uploads::MAX_UPLOAD_BYTES;
use crate::backend::auth::{get_profile, login, register_client, register_freelancer};
use crate::backend::middleware::{auth_middleware, require_client, require_freelancer};
use crate::backend::server::state::AppState;

/// Body limit for the freelancer form: two files plus text fields
pub const MAX_FORM_BYTES: usize = 2 * MAX_UPLOAD_BYTES + 1024 * 1024;

async fn api_test() -> Json<Value> {
    Json(json!({ "message": "Backend is working!" }))
}

/// Configure API routes
///
/// Returned routes are relative; the caller nests them under `/api`.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the access guard
///
/// # Authentication
///
/// Protected routes run the access guard first, then the role gate where
/// one applies. `route_layer` keeps unknown paths on the 404 fallback
/// instead of answering them with 401.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let guard = middleware::from_fn_with_state(app_state.clone(), auth_middleware);

    let protected = Router::new()
        .route("/profile", get(get_profile))
        .route_layer(guard.clone());

    let client_only = Router::new()
        .route("/client/profile", get(get_profile))
        .route_layer(middleware::from_fn(require_client))
        .route_layer(guard.clone());

    let freelancer_only = Router::new()
        .route("/freelancer/profile", get(get_profile))
        .route_layer(middleware::from_fn(require_freelancer))
        .route_layer(guard);

    router
        .route("/test", get(api_test))
        .route("/register/client", post(register_client))
        .route(
            "/register/freelancer",
            post(register_freelancer).layer(DefaultBodyLimit::max(MAX_FORM_BYTES)),
        )
        .route("/login", post(login))
        .merge(protected)
        .merge(client_only)
        .merge(freelancer_only)
}
