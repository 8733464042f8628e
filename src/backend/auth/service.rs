/**
 * Authentication Flows
 *
 * `AuthService` ties the password hasher, token issuer/verifier, credential
 * store and upload store together. Handlers validate their request bodies
 * into the input types below and call one flow each; the access guard
 * middleware calls `authenticate`.
 *
 * # Registration
 *
 * Reject duplicate email → store uploads → write identity and
 * profile in one transaction → issue token. Any failure after uploads were
 * stored removes them again; the transaction rolls back on drop.
 *
 * # Access guard
 *
 * `MissingToken` → `InvalidToken` → `ExpiredToken` → `UnknownSubject`, each
 * checked in that order and from scratch on every request.
 */

use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::auth::error::AuthError;
use crate::backend::auth::password::{PasswordHasher, Secret};
use crate::backend::auth::profiles::{
    self, NewClientProfile, NewFreelancerProfile, NewRoleProfile, RoleProfile,
};
use crate::backend::auth::sessions::{JwtSecret, TokenIssuer, TokenVerifier};
use crate::backend::auth::uploads::{IncomingFile, StoredUpload, UploadKind, UploadStore};
use crate::backend::auth::users::{self, IdentitySummary, NewIdentity};
use crate::shared::Role;

/// Checked account fields common to both registrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Checked login input
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub email: String,
    pub password: String,
    /// None when the declared type is not a known role
    pub role: Option<Role>,
}

/// Identity resolved by the access guard, attached to request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub identity: IdentitySummary,
    /// Role carried by the verified token
    pub role: Role,
}

impl AuthenticatedUser {
    /// Role gate: succeeds iff the verified role is `expected`
    pub fn require_role(&self, expected: Role) -> Result<(), AuthError> {
        if self.role == expected {
            Ok(())
        } else {
            Err(AuthError::ForbiddenRole { expected })
        }
    }
}

/// Result of a successful registration
#[derive(Debug)]
pub struct Registration {
    pub token: String,
    pub identity: IdentitySummary,
    pub profile: RoleProfile,
}

/// Result of a successful login
#[derive(Debug)]
pub struct LoginSuccess {
    pub token: String,
    pub identity: IdentitySummary,
    pub profile: Option<RoleProfile>,
}

/// Identity merged with its profile
#[derive(Debug)]
pub struct ProfileView {
    pub identity: IdentitySummary,
    pub profile: Option<RoleProfile>,
}

struct Inner {
    pool: SqlitePool,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    uploads: UploadStore,
}

/// Registration, login and verification flows
#[derive(Clone)]
pub struct AuthService {
    inner: Arc<Inner>,
}

impl AuthService {
    pub fn new(
        pool: SqlitePool,
        secret: &JwtSecret,
        hasher: PasswordHasher,
        uploads: UploadStore,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                pool,
                hasher,
                issuer: TokenIssuer::new(secret),
                verifier: TokenVerifier::new(secret),
                uploads,
            }),
        }
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    #[cfg(test)]
    fn issuer(&self) -> &TokenIssuer {
        &self.inner.issuer
    }

    #[cfg(test)]
    fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }

    pub async fn register_client(
        &self,
        account: AccountFields,
        profile: NewClientProfile,
    ) -> Result<Registration, AuthError> {
        self.ensure_email_free(&account.email).await?;

        self.create_account(account, Role::Client, NewRoleProfile::Client(profile))
            .await
    }

    /// Register a freelancer with already-validated file parts
    pub async fn register_freelancer(
        &self,
        account: AccountFields,
        mut profile: NewFreelancerProfile,
        files: Vec<IncomingFile>,
    ) -> Result<Registration, AuthError> {
        self.ensure_email_free(&account.email).await?;

        let stored = self.inner.uploads.store_all(&files).await?;
        for upload in &stored {
            match upload.kind {
                UploadKind::ProfilePicture => profile.profile_picture = Some(upload.public_path.clone()),
                UploadKind::Resume => profile.resume = Some(upload.public_path.clone()),
            }
        }

        let result = self
            .create_account(account, Role::Freelancer, NewRoleProfile::Freelancer(profile))
            .await;
        if result.is_err() {
            self.discard_uploads(&stored).await;
        }
        result
    }

    async fn discard_uploads(&self, stored: &[StoredUpload]) {
        if !stored.is_empty() {
            tracing::warn!("Registration failed, removing {} stored upload(s)", stored.len());
            self.inner.uploads.discard(stored).await;
        }
    }

    async fn ensure_email_free(&self, email: &str) -> Result<(), AuthError> {
        if users::email_exists(&self.inner.pool, email).await? {
            tracing::warn!("Email already registered: {}", email);
            return Err(AuthError::DuplicateEmail);
        }
        Ok(())
    }

    /// Write identity and profile as one unit, then issue a token
    async fn create_account(
        &self,
        account: AccountFields,
        role: Role,
        profile: NewRoleProfile,
    ) -> Result<Registration, AuthError> {
        debug_assert_eq!(profile.role(), role);

        let mut tx = self.inner.pool.begin().await?;
        let identity = users::insert_identity(
            &mut tx,
            NewIdentity {
                name: account.name,
                email: account.email,
                secret: Secret::plain(account.password),
                role,
            },
            &self.inner.hasher,
        )
        .await?;
        let profile = profiles::insert_profile(&mut tx, identity.id, profile).await?;
        tx.commit().await?;

        let token = self.inner.issuer.issue(identity.id, role)?;
        tracing::info!("Registered {} {} ({})", role, identity.id, identity.email);

        Ok(Registration {
            token,
            identity: IdentitySummary::from(&identity),
            profile,
        })
    }

    /// Verify credentials for the declared role and issue a token
    ///
    /// Unknown email, wrong role and wrong password are all
    /// `InvalidCredentials`, and each pays one bcrypt run.
    pub async fn login(&self, attempt: &LoginAttempt) -> Result<LoginSuccess, AuthError> {
        let Some(role) = attempt.role else {
            tracing::warn!("Login with unknown user type for: {}", attempt.email);
            return self.reject_without_account(&attempt.password);
        };

        let Some(identity) =
            users::find_identity_for_login(&self.inner.pool, &attempt.email, role).await?
        else {
            tracing::warn!("No {} account for: {}", role, attempt.email);
            return self.reject_without_account(&attempt.password);
        };

        if !self.inner.hasher.verify(&attempt.password, &identity.password_hash)? {
            tracing::warn!("Invalid password for: {}", attempt.email);
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        users::touch_last_login(&self.inner.pool, identity.id, now).await?;

        let profile = profiles::find_profile(&self.inner.pool, identity.id, role).await?;
        if profile.is_none() {
            tracing::warn!("Identity {} has no {} profile", identity.id, role);
        }

        let token = self.inner.issuer.issue(identity.id, role)?;
        tracing::info!("User logged in: {} ({})", identity.id, identity.email);

        let mut summary = IdentitySummary::from(&identity);
        summary.last_login = Some(now);

        Ok(LoginSuccess {
            token,
            identity: summary,
            profile,
        })
    }

    fn reject_without_account<T>(&self, password: &str) -> Result<T, AuthError> {
        self.inner.hasher.verify_missing(password)?;
        Err(AuthError::InvalidCredentials)
    }

    /// Access guard: resolve an `Authorization` header value to an identity
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let token = authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let verified = self.inner.verifier.verify(token)?;

        let identity = users::get_identity_by_id(&self.inner.pool, verified.identity_id)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(AuthenticatedUser {
            identity: IdentitySummary::from(&identity),
            role: verified.role,
        })
    }

    /// Merge an authenticated identity with its profile
    pub async fn profile(&self, user: &AuthenticatedUser) -> Result<ProfileView, AuthError> {
        let profile =
            profiles::find_profile(&self.inner.pool, user.identity.id, user.identity.user_type)
                .await?;

        Ok(ProfileView {
            identity: user.identity.clone(),
            profile,
        })
    }

    /// Profile retrieval straight from a header value
    pub async fn get_profile(&self, authorization: Option<&str>) -> Result<ProfileView, AuthError> {
        let user = self.authenticate(authorization).await?;
        self.profile(&user).await
    }
}
