/**
 * Authentication Errors
 *
 * One variant per failure the registration, login and access-guard flows
 * can produce. The HTTP mapping lives here as well so that every caller
 * reports a given failure with the same status and message.
 *
 * # Uniform messages
 *
 * - All four token failures render as `Invalid or expired token`
 * - Unknown email, wrong password and wrong role render as
 *   `Invalid email or password`
 *
 * Internal variants (`Database`, `Hashing`, `Token`, `Storage`, `Internal`)
 * map to 500; the caller decides the public message for those.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::uploads::UploadKind;
use crate::shared::{Role, SharedError};

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const INTERNAL_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("email already registered")]
    DuplicateEmail,

    /// Unknown email, wrong password or wrong declared role
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no bearer token provided")]
    MissingToken,

    #[error("token signature or payload invalid")]
    InvalidToken,

    #[error("token expired")]
    ExpiredToken,

    #[error("token subject does not exist")]
    UnknownSubject,

    #[error("route requires role {expected}")]
    ForbiddenRole { expected: Role },

    #[error("unsupported file type for {kind}: {file_name}")]
    UnsupportedFileType { kind: UploadKind, file_name: String },

    #[error("{kind} exceeds the {limit} byte upload limit")]
    FileTooLarge { kind: UploadKind, limit: usize },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("token encoding failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("upload storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

impl From<SharedError> for AuthError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { message, .. } => AuthError::Validation(message),
        }
    }
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for failures that are not the caller's fault
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database(_)
                | Self::Hashing(_)
                | Self::Token(_)
                | Self::Storage(_)
                | Self::Internal(_)
        )
    }

    /// True for the failures of the access guard's verification steps
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::InvalidToken | Self::ExpiredToken | Self::UnknownSubject
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::DuplicateEmail
            | Self::UnsupportedFileType { .. }
            | Self::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::InvalidToken
            | Self::ExpiredToken
            | Self::UnknownSubject => StatusCode::UNAUTHORIZED,
            Self::ForbiddenRole { .. } => StatusCode::FORBIDDEN,
            Self::Database(_)
            | Self::Hashing(_)
            | Self::Token(_)
            | Self::Storage(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::DuplicateEmail => "Email already registered".to_string(),
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::MissingToken | Self::InvalidToken | Self::ExpiredToken | Self::UnknownSubject => {
                INVALID_TOKEN_MESSAGE.to_string()
            }
            Self::ForbiddenRole { expected } => {
                format!("Access denied. This route is only for {expected}s.")
            }
            Self::UnsupportedFileType { kind, .. } => kind.rejection_message().to_string(),
            Self::FileTooLarge { limit, .. } => {
                format!("File too large. Maximum size is {} MB", limit / (1024 * 1024))
            }
            Self::Database(_)
            | Self::Hashing(_)
            | Self::Token(_)
            | Self::Storage(_)
            | Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_failures_share_one_response() {
        let failures = [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::ExpiredToken,
            AuthError::UnknownSubject,
        ];
        for failure in failures {
            assert!(failure.is_token_rejection());
            assert_eq!(failure.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(failure.public_message(), INVALID_TOKEN_MESSAGE);
        }
    }

    #[test]
    fn test_forbidden_role_message() {
        let err = AuthError::ForbiddenRole { expected: Role::Client };
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.public_message(), "Access denied. This route is only for clients.");

        let err = AuthError::ForbiddenRole { expected: Role::Freelancer };
        assert_eq!(
            err.public_message(),
            "Access denied. This route is only for freelancers."
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AuthError::Internal("disk on fire".to_string());
        assert!(err.is_internal());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_upload_rejections_are_bad_requests() {
        let err = AuthError::UnsupportedFileType {
            kind: UploadKind::Resume,
            file_name: "resume.exe".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Only PDF and DOC files are allowed for resume!");

        let err = AuthError::FileTooLarge {
            kind: UploadKind::ProfilePicture,
            limit: 5 * 1024 * 1024,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "File too large. Maximum size is 5 MB");
    }

    #[test]
    fn test_from_shared_error() {
        let err: AuthError = SharedError::validation("companySize", "bad bucket").into();
        match err {
            AuthError::Validation(message) => assert_eq!(message, "bad bucket"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }
}
