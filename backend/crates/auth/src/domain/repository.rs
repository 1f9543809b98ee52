//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::RefreshTokenId;

use crate::domain::entity::{
    refresh_token::{RefreshToken, TOKEN_HASH_LEN},
    user::User,
};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    ///
    /// A concurrent registration of the same e-mail fails with
    /// `AuthError::EmailAlreadyExists`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by exact e-mail
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if e-mail is registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}

/// Refresh token repository trait
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    /// Persist a newly issued token
    async fn create(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Find a token by fingerprint, revoked or not
    async fn find_by_hash(&self, token_hash: &[u8; TOKEN_HASH_LEN])
    -> AuthResult<Option<RefreshToken>>;

    /// Consume `consumed` and persist `replacement` atomically
    ///
    /// The revoke is conditional on `revoked_at IS NULL`. Returns `false`
    /// (and persists nothing) when another caller consumed the token first.
    async fn rotate(
        &self,
        consumed: &RefreshTokenId,
        replacement: &RefreshToken,
        now: DateTime<Utc>,
    ) -> AuthResult<bool>;

    /// Revoke by fingerprint if still active
    ///
    /// Returns the token when this call revoked it; `None` when the token is
    /// unknown or was already revoked.
    async fn revoke_by_hash(
        &self,
        token_hash: &[u8; TOKEN_HASH_LEN],
        now: DateTime<Utc>,
    ) -> AuthResult<Option<RefreshToken>>;

    /// Delete tokens that expired before `cutoff`
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64>;
}
