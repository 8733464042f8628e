/**
 * Identity Model and Database Operations
 *
 * This module handles account identities and their persistence. An
 * identity is independent of its role-specific profile; see `profiles`.
 *
 * Email uniqueness is enforced by the `users.email` UNIQUE constraint and
 * compared exactly as stored.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::backend::auth::error::AuthError;
use crate::backend::auth::password::{PasswordHash, PasswordHasher, Secret};
use crate::shared::Role;

/// Row shape of the `users` table
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    user_type: String,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

/// Account identity as held by the server
///
/// Not `Serialize`: responses go through `IdentitySummary`, which has no
/// password field.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Unique identity ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// bcrypt digest of the password
    pub password_hash: PasswordHash,
    /// Fixed at creation
    pub role: Role,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for Identity {
    type Error = AuthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.user_type.parse::<Role>().map_err(|_| {
            AuthError::Internal(format!("stored user {} has unknown role", row.id))
        })?;

        Ok(Identity {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: PasswordHash::from_stored(row.password_hash),
            role,
            created_at: row.created_at,
            last_login: row.last_login,
        })
    }
}

/// Identity fields that may leave the server
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: Role,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&Identity> for IdentitySummary {
    fn from(identity: &Identity) -> Self {
        IdentitySummary {
            id: identity.id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            user_type: identity.role,
            created_at: identity.created_at,
            last_login: identity.last_login,
        }
    }
}

/// Input for `insert_identity`
#[derive(Debug)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub secret: Secret,
    pub role: Role,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, user_type, created_at, last_login";

/// Check whether any identity, of either role, uses this email
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Create a new identity
///
/// The secret is sealed right before the write, so a failed hash means no
/// row is written. A UNIQUE violation on email is reported as
/// `DuplicateEmail`.
///
/// # Arguments
/// * `conn` - Connection or open transaction
/// * `new` - Identity fields
/// * `hasher` - Password hasher used to seal a plain secret
pub async fn insert_identity(
    conn: &mut SqliteConnection,
    new: NewIdentity,
    hasher: &PasswordHasher,
) -> Result<Identity, AuthError> {
    let password_hash = new.secret.seal(hasher)?;
    let id = Uuid::new_v4();
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, user_type, created_at, last_login)
        VALUES (?, ?, ?, ?, ?, ?, NULL)
        "#,
    )
    .bind(id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(password_hash.as_str())
    .bind(new.role.as_str())
    .bind(now)
    .execute(&mut *conn)
    .await;

    if let Err(e) = result {
        return Err(match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::DuplicateEmail,
            other => AuthError::Database(other),
        });
    }

    Ok(Identity {
        id,
        name: new.name,
        email: new.email,
        password_hash,
        role: new.role,
        created_at: now,
        last_login: None,
    })
}

/// Get identity by ID
///
/// # Returns
/// Identity or None if not found
pub async fn get_identity_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Identity>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Identity::try_from).transpose()
}

/// Get the identity registered under `email` with the given role
///
/// An email registered under the other role yields `None`, exactly like an
/// unknown email.
pub async fn find_identity_for_login(
    pool: &SqlitePool,
    email: &str,
    role: Role,
) -> Result<Option<Identity>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ? AND user_type = ?"
    ))
    .bind(email)
    .bind(role.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(Identity::try_from).transpose()
}

/// Record a successful login
pub async fn touch_last_login(
    pool: &SqlitePool,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(at)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn count_by_email(pool: &SqlitePool, email: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
}
