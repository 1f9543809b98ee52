//! Logout Use Case
//!
//! Revokes a refresh token. Idempotent: unknown or already revoked tokens
//! succeed silently.

use std::sync::Arc;

use audit::{AuditEntry, AuditSink, append_best_effort};
use chrono::Utc;
use kernel::id::UserId;
use platform::client::ClientInfo;

use crate::domain::repository::RefreshTokenRepository;
use crate::domain::token::TokenService;
use crate::error::AuthResult;

/// Logout input
pub struct LogoutInput {
    /// Caller resolved from the access token
    pub user_id: UserId,
    pub refresh_token: String,
    pub client: ClientInfo,
}

/// Logout use case
pub struct LogoutUseCase<R, T, A>
where
    R: RefreshTokenRepository,
    T: TokenService,
    A: AuditSink,
{
    repo: Arc<R>,
    tokens: Arc<T>,
    audit: Arc<A>,
}

impl<R, T, A> LogoutUseCase<R, T, A>
where
    R: RefreshTokenRepository + Sync,
    T: TokenService,
    A: AuditSink + Sync,
{
    pub fn new(repo: Arc<R>, tokens: Arc<T>, audit: Arc<A>) -> Self {
        Self {
            repo,
            tokens,
            audit,
        }
    }

    pub async fn execute(&self, input: LogoutInput) -> AuthResult<()> {
        let fingerprint = self.tokens.fingerprint(&input.refresh_token);

        let Some(revoked) = self.repo.revoke_by_hash(&fingerprint, Utc::now()).await? else {
            tracing::debug!(user_id = %input.user_id, "Logout with inactive refresh token");
            return Ok(());
        };

        append_best_effort(
            self.audit.as_ref(),
            AuditEntry::new(revoked.user_id, "refresh_token", revoked.id, "revoked")
                .with_client(&input.client),
        )
        .await;

        tracing::info!(user_id = %input.user_id, "User logged out");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::refresh_token::RefreshToken;
    use crate::infra::{InMemoryAuthRepository, JwtTokenService};
    use crate::application::config::AuthConfig;
    use audit::InMemoryAuditLog;

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let audit = InMemoryAuditLog::new();
        let tokens = Arc::new(JwtTokenService::from_config(&AuthConfig::for_tests()));
        let use_case = LogoutUseCase::new(repo.clone(), tokens.clone(), Arc::new(audit.clone()));

        let user_id = UserId::new();
        let issued = tokens.issue_refresh();
        repo.create(&RefreshToken::issue(
            user_id,
            issued.fingerprint,
            chrono::Duration::days(1),
            Utc::now(),
        ))
        .await
        .unwrap();

        let input = || LogoutInput {
            user_id,
            refresh_token: issued.plaintext.clone(),
            client: ClientInfo::default(),
        };

        use_case.execute(input()).await.unwrap();
        use_case.execute(input()).await.unwrap();

        assert!(repo.refresh_tokens().await[0].is_revoked());
        // Only the effective revoke is journaled
        assert_eq!(audit.event_names().await, vec!["refresh_token.revoked"]);
    }

    #[tokio::test]
    async fn test_logout_unknown_token_succeeds() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let tokens = Arc::new(JwtTokenService::from_config(&AuthConfig::for_tests()));
        let use_case = LogoutUseCase::new(repo, tokens, Arc::new(InMemoryAuditLog::new()));

        let result = use_case
            .execute(LogoutInput {
                user_id: UserId::new(),
                refresh_token: "never-issued".to_string(),
                client: ClientInfo::default(),
            })
            .await;
        assert!(result.is_ok());
    }
}
