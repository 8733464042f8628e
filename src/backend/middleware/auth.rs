/**
 * Authentication Middleware
 *
 * Access guard and role gates for protected routes.
 *
 * `auth_middleware` reads the `Authorization: Bearer <token>` header,
 * verifies the token and resolves its subject, then attaches an
 * `AuthenticatedUser` to the request extensions. The role gates run after
 * it and only compare the verified role.
 *
 * Every rejection is a JSON `{success: false, message}` body.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::error::INTERNAL_MESSAGE;
use crate::backend::auth::{AuthError, AuthenticatedUser};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Access guard middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies signature and expiry
/// 3. Resolves the subject to an existing identity
/// 4. Attaches the identity to request extensions for handlers
///
/// Returns 401 with a uniform message if any step fails.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    // Owned copies: the request body is not Sync, so no borrow may cross an await
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    let path = request.uri().path().to_string();

    let user = app_state.auth.authenticate(header.as_deref()).await.map_err(|e| {
        if e.is_token_rejection() {
            tracing::warn!("Rejected request to {}: {}", path, e);
        }
        BackendError::from_flow(e, INTERNAL_MESSAGE, app_state.expose_error_details())
    })?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Role gate for client-only routes
pub async fn require_client(request: Request, next: Next) -> Result<Response, BackendError> {
    require_role(Role::Client, request, next).await
}

/// Role gate for freelancer-only routes
pub async fn require_freelancer(request: Request, next: Next) -> Result<Response, BackendError> {
    require_role(Role::Freelancer, request, next).await
}

async fn require_role(expected: Role, request: Request, next: Next) -> Result<Response, BackendError> {
    let user = extract_authenticated_user(&request)?;
    user.require_role(expected).map_err(|e| {
        tracing::warn!(
            "Identity {} with role {} denied {} route",
            user.identity.id,
            user.role,
            expected
        );
        BackendError::from(e)
    })?;

    Ok(next.run(request).await)
}

/// Extract authenticated user from request extensions
///
/// This is a helper for code that runs after `auth_middleware`. A missing
/// user means the guard did not run, which is reported as a missing token.
pub fn extract_authenticated_user(request: &Request) -> Result<AuthenticatedUser, BackendError> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::from(AuthError::MissingToken)
        })
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::from(AuthError::MissingToken)
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::IdentitySummary;
    use axum::body::Body;
    use axum::http::StatusCode;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            identity: IdentitySummary {
                id: Uuid::new_v4(),
                name: "Someone".to_string(),
                email: "someone@x.com".to_string(),
                user_type: role,
                created_at: Utc::now(),
                last_login: None,
            },
            role,
        }
    }

    #[test]
    fn test_extract_authenticated_user() {
        let mut request = Request::builder()
            .uri("http://example.com")
            .body(Body::empty())
            .unwrap();

        let user = user(Role::Client);
        request.extensions_mut().insert(user.clone());

        let extracted = extract_authenticated_user(&request).unwrap();
        assert_eq!(extracted.identity.id, user.identity.id);
    }

    #[test]
    fn test_extract_authenticated_user_missing() {
        let request = Request::builder()
            .uri("http://example.com")
            .body(Body::empty())
            .unwrap();

        let err = extract_authenticated_user(&request).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_auth_user_extractor() {
        let request = Request::builder()
            .uri("http://example.com")
            .extension(user(Role::Freelancer))
            .body(())
            .unwrap();
        let (mut parts, ()) = request.into_parts();

        let AuthUser(extracted) = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted.role, Role::Freelancer);
    }
}
