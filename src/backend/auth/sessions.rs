/**
 * Session Tokens
 *
 * HS256 JSON Web Tokens carrying the identity id and role. Tokens live for
 * a fixed 7 days, are never stored server-side and cannot be revoked.
 *
 * Verification runs in a fixed order so that each step has its own
 * failure: signature/structure (`InvalidToken`), expiry (`ExpiredToken`),
 * then subject id format (`InvalidToken`). Resolving the subject against
 * the credential store is the access guard's job, see `AuthService`.
 */

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::error::AuthError;
use crate::shared::Role;

/// Token validity window in seconds (7 days)
pub const TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Process-wide signing secret
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct JwtSecret(String);

impl JwtSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(<redacted>)")
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity ID
    pub sub: String,
    /// Role at issuance
    #[serde(rename = "userType")]
    pub user_type: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A token that passed signature and expiry checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity_id: Uuid,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Mints signed tokens
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &JwtSecret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, identity_id: Uuid, role: Role) -> Result<String, AuthError> {
        self.issue_at(identity_id, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        identity_id: Uuid,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: identity_id.to_string(),
            user_type: role,
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.key)?)
    }
}

/// Checks tokens minted by a `TokenIssuer` sharing the same secret
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &JwtSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand so it can be told apart from a bad signature
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, AuthError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e);
                AuthError::InvalidToken
            })?
            .claims;

        if now.timestamp() > claims.exp {
            return Err(AuthError::ExpiredToken);
        }

        let identity_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(VerifiedToken {
            identity_id,
            role: claims.user_type,
            issued_at: claims.iat,
            expires_at: claims.exp,
        })
    }
}
