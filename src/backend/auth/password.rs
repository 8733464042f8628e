/**
 * Password Hashing
 *
 * bcrypt hashing with a per-hash random salt. Storage only ever accepts a
 * `PasswordHash`, and a `Secret` is sealed into one exactly once: a plain
 * value is hashed, an already hashed value passes through unchanged.
 */

use std::fmt;

use bcrypt::{hash, verify};

use crate::backend::auth::error::AuthError;

/// bcrypt digest as stored in the credential store
///
/// Deliberately not `Serialize`; `Debug` does not print the digest.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest read back from storage
    pub fn from_stored(digest: String) -> Self {
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Password value on its way to storage
pub enum Secret {
    /// Freshly supplied by the user, not yet hashed
    Plain(String),
    /// Already hashed; must not be hashed again
    Hashed(PasswordHash),
}

impl Secret {
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Plain(value.into())
    }

    /// Produce the digest to persist
    pub fn seal(self, hasher: &PasswordHasher) -> Result<PasswordHash, AuthError> {
        match self {
            Secret::Plain(plaintext) => hasher.hash(&plaintext),
            Secret::Hashed(digest) => Ok(digest),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Plain(_) => f.write_str("Secret::Plain(<redacted>)"),
            Secret::Hashed(_) => f.write_str("Secret::Hashed(<redacted>)"),
        }
    }
}

/// bcrypt hasher with a configured work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<PasswordHash, AuthError> {
        let digest = hash(plaintext, self.cost)?;
        Ok(PasswordHash(digest))
    }

    /// Check a candidate password against a stored digest
    ///
    /// A digest that bcrypt cannot parse is an internal error, not a
    /// mismatch.
    pub fn verify(&self, plaintext: &str, stored: &PasswordHash) -> Result<bool, AuthError> {
        Ok(verify(plaintext, stored.as_str())?)
    }

    /// Spend one bcrypt run at the configured cost when there is no stored
    /// digest to check, so a missing account answers as slowly as a wrong
    /// password. Always a mismatch.
    pub fn verify_missing(&self, plaintext: &str) -> Result<bool, AuthError> {
        hash(plaintext, self.cost)?;
        Ok(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
