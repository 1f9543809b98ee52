//! Token Service Trait
//!
//! Two tokens are issued per login:
//! - a short-lived signed access token carrying the user id as `sub`
//! - a long-lived opaque refresh token, persisted only as a fingerprint

use std::time::Duration;

use kernel::id::UserId;

use crate::domain::entity::refresh_token::TOKEN_HASH_LEN;
use crate::error::AuthResult;

/// Freshly generated refresh token
///
/// `plaintext` goes to the client exactly once; only `fingerprint` is stored.
pub struct IssuedRefreshToken {
    pub plaintext: String,
    pub fingerprint: [u8; TOKEN_HASH_LEN],
}

impl std::fmt::Debug for IssuedRefreshToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedRefreshToken")
            .field("plaintext", &"[REDACTED]")
            .finish()
    }
}

pub trait TokenService: Send + Sync {
    /// Sign an access token for `user_id`
    fn issue_access(&self, user_id: UserId) -> AuthResult<String>;

    /// Verify signature, algorithm and expiry; return the subject
    ///
    /// Fails with `TokenExpired` past expiry and `TokenInvalid` otherwise.
    fn verify_access(&self, token: &str) -> AuthResult<UserId>;

    /// Generate a new refresh token and its fingerprint
    fn issue_refresh(&self) -> IssuedRefreshToken;

    /// Deterministic fingerprint of a refresh token's exact text
    fn fingerprint(&self, plaintext: &str) -> [u8; TOKEN_HASH_LEN];

    /// Lifetime of issued access tokens
    fn access_ttl(&self) -> Duration;
}
