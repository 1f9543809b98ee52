//! Token pair issued by Register, Login and RefreshToken

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::repository::RefreshTokenRepository;
use crate::domain::token::{IssuedRefreshToken, TokenService};
use crate::error::AuthResult;

/// Access token, plaintext refresh token and access lifetime in seconds
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Generate a refresh token for `user_id` without persisting it
pub(crate) fn prepare_refresh_token<T>(
    tokens: &T,
    config: &AuthConfig,
    user_id: UserId,
    now: DateTime<Utc>,
) -> (IssuedRefreshToken, RefreshToken)
where
    T: TokenService,
{
    let issued = tokens.issue_refresh();
    let record = RefreshToken::issue(
        user_id,
        issued.fingerprint,
        config.refresh_token_ttl_chrono(),
        now,
    );
    (issued, record)
}

/// Sign the access token and pair it with an already persisted refresh token
pub(crate) fn complete_pair<T>(
    tokens: &T,
    user_id: UserId,
    refresh: IssuedRefreshToken,
) -> AuthResult<TokenPair>
where
    T: TokenService,
{
    Ok(TokenPair {
        access_token: tokens.issue_access(user_id)?,
        refresh_token: refresh.plaintext,
        expires_in: tokens.access_ttl().as_secs(),
    })
}

/// Issue and persist a fresh pair (Register, Login)
pub(crate) async fn issue_token_pair<R, T>(
    repo: &R,
    tokens: &T,
    config: &AuthConfig,
    user_id: UserId,
) -> AuthResult<TokenPair>
where
    R: RefreshTokenRepository + Sync,
    T: TokenService,
{
    let (issued, record) = prepare_refresh_token(tokens, config, user_id, Utc::now());
    repo.create(&record).await?;
    complete_pair(tokens, user_id, issued)
}
