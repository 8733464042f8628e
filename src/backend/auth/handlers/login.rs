/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /api/login.
 *
 * # Authentication Process
 *
 * 1. Look up the identity by email and declared role
 * 2. Verify password using bcrypt
 * 3. Stamp the last login time
 * 4. Return token, account and profile
 *
 * # Security
 *
 * - Unknown email, wrong role and wrong password return the same 401
 * - Passwords are never logged or returned in responses
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::error::AuthError;
use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse, LoginUser, UserResponse};
use crate::backend::error::{BackendError, LOGIN_FAILED_MESSAGE};
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing email, password or user type
/// * `401 Unauthorized` - Credentials do not match an account of that role
/// * `500 Internal Server Error` - Database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "a@x.com",
///   "password": "pw123456",
///   "userType": "client"
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, BackendError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected login body: {}", rejection.body_text());
        BackendError::from(AuthError::validation("Invalid request body"))
    })?;

    let expose = app_state.expose_error_details();

    let attempt = request
        .validate()
        .map_err(|e| BackendError::from_flow(e, LOGIN_FAILED_MESSAGE, expose))?;

    let success = app_state
        .auth
        .login(&attempt)
        .await
        .map_err(|e| BackendError::from_flow(e, LOGIN_FAILED_MESSAGE, expose))?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token: success.token,
        user: LoginUser {
            user: UserResponse::from(&success.identity),
            profile: success.profile,
        },
    }))
}
