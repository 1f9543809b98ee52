//! Refresh Token Use Case
//!
//! Exchanges a refresh token for a new pair. Each refresh token is
//! single-use: the presented token is revoked in the same transaction that
//! stores its replacement, and only one of several concurrent callers
//! presenting the same token can win that revoke.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token_pair::{TokenPair, complete_pair, prepare_refresh_token};
use crate::domain::repository::RefreshTokenRepository;
use crate::domain::token::TokenService;
use crate::error::{AuthError, AuthResult};

/// Refresh input
pub struct RefreshTokenInput {
    pub refresh_token: String,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<R, T>
where
    R: RefreshTokenRepository,
    T: TokenService,
{
    repo: Arc<R>,
    tokens: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<R, T> RefreshTokenUseCase<R, T>
where
    R: RefreshTokenRepository + Sync,
    T: TokenService,
{
    pub fn new(repo: Arc<R>, tokens: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: RefreshTokenInput) -> AuthResult<TokenPair> {
        let fingerprint = self.tokens.fingerprint(&input.refresh_token);

        let record = self
            .repo
            .find_by_hash(&fingerprint)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        if record.is_revoked() {
            tracing::warn!(user_id = %record.user_id, token_id = %record.id, "Refresh token reuse");
            return Err(AuthError::TokenRevoked);
        }

        let now = Utc::now();
        if record.is_expired(now) {
            return Err(AuthError::TokenExpired);
        }

        let (issued, replacement) =
            prepare_refresh_token(self.tokens.as_ref(), &self.config, record.user_id, now);

        if !self.repo.rotate(&record.id, &replacement, now).await? {
            // Lost the race against a concurrent rotation or logout
            return Err(AuthError::TokenRevoked);
        }

        tracing::debug!(user_id = %record.user_id, "Refresh token rotated");

        complete_pair(self.tokens.as_ref(), record.user_id, issued)
    }
}
