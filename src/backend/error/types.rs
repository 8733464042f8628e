/**
 * Backend Error Types
 *
 * HTTP-facing error type returned by every handler and middleware.
 *
 * # Error Types
 *
 * - `HandlerError` - Request-level failures with an explicit status
 *   (unknown route, malformed body)
 * - `Auth` - A domain failure from the authentication core, rendered with
 *   its own status and public message
 * - `InternalError` - An unexpected failure; the message is the flow's
 *   fallback text and the detail is only shown in development
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * Validation, duplicate email and upload rejections (400), credential and
 * token failures (401), role gate failures (403).
 *
 * ## Internal errors
 *
 * Database, hashing, token encoding and storage failures. These are logged
 * with full detail and reported with a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::AuthError;

/// Public message for failed registrations
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

/// Public message for failed logins
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use freelance_hub::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Route not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., unknown route, unreadable body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Authentication core error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Unexpected failure with a flow-specific public message
    #[error("Internal error: {message}")]
    InternalError {
        /// Message shown to the client
        message: String,
        /// Underlying cause, only rendered when detail exposure is enabled
        detail: Option<String>,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status code
    /// * `message` - Error message
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>, detail: Option<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            detail,
        }
    }

    /// Convert a flow failure at the route boundary
    ///
    /// Client-facing failures keep their own status and message. Internal
    /// failures are logged and reported with `fallback`; the cause is
    /// attached only when `expose_detail` is set.
    ///
    /// # Arguments
    ///
    /// * `err` - The failure produced by the flow
    /// * `fallback` - Public message for internal failures
    /// * `expose_detail` - Whether to include the cause in the response
    pub fn from_flow(err: AuthError, fallback: &str, expose_detail: bool) -> Self {
        if err.is_internal() {
            tracing::error!("{}: {:?}", fallback, err);
            Self::internal(fallback, expose_detail.then(|| err.to_string()))
        } else {
            Self::Auth(err)
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Auth` - Delegates to `AuthError::status_code`
    /// - `InternalError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(err) => err.status_code(),
            Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the public error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(err) => err.public_message(),
            Self::InternalError { message, .. } => message.clone(),
        }
    }

    /// Internal detail, if any may be shown
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::InternalError { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::error::INTERNAL_MESSAGE;
    use crate::shared::Role;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_client_failures_pass_through() {
        let error = BackendError::from_flow(AuthError::DuplicateEmail, REGISTRATION_FAILED_MESSAGE, true);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Email already registered");
        assert!(error.detail().is_none());

        let error = BackendError::from_flow(
            AuthError::ForbiddenRole {
                expected: Role::Freelancer,
            },
            INTERNAL_MESSAGE,
            true,
        );
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(error.message(), "Access denied. This route is only for freelancers.");
    }

    #[test]
    fn test_token_failures_share_message() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::UnknownSubject,
        ] {
            let error = BackendError::from(err);
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(error.message(), "Invalid or expired token");
        }
    }

    #[test]
    fn test_internal_detail_only_when_exposed() {
        let hidden = BackendError::from_flow(
            AuthError::Internal("disk on fire".to_string()),
            LOGIN_FAILED_MESSAGE,
            false,
        );
        assert_eq!(hidden.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hidden.message(), LOGIN_FAILED_MESSAGE);
        assert!(hidden.detail().is_none());

        let shown = BackendError::from_flow(
            AuthError::Internal("disk on fire".to_string()),
            LOGIN_FAILED_MESSAGE,
            true,
        );
        assert_eq!(shown.detail(), Some("disk on fire"));
    }
}
