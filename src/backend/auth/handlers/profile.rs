/**
 * Profile Handler
 *
 * GET /api/profile, and the role-gated /api/client/profile and
 * /api/freelancer/profile. The access guard has already resolved the
 * identity; this handler only merges in the role profile.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::error::INTERNAL_MESSAGE;
use crate::backend::auth::handlers::types::{ProfileResponse, ProfileUser};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// Current account profile handler
///
/// # Example Response
///
/// ```json
/// {
///   "success": true,
///   "user": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "name": "Acme Co",
///     "email": "a@x.com",
///     "userType": "client",
///     "createdAt": "2025-01-01T00:00:00Z",
///     "lastLogin": null,
///     "profile": { "kind": "client", "businessName": "Acme", "...": "..." }
///   }
/// }
/// ```
pub async fn get_profile(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, BackendError> {
    let view = app_state.auth.profile(&user).await.map_err(|e| {
        BackendError::from_flow(e, INTERNAL_MESSAGE, app_state.expose_error_details())
    })?;

    if view.profile.is_none() {
        tracing::warn!("Identity {} has no {} profile", view.identity.id, view.identity.user_type);
    }

    Ok(Json(ProfileResponse {
        success: true,
        user: ProfileUser {
            identity: view.identity,
            profile: view.profile,
        },
    }))
}
