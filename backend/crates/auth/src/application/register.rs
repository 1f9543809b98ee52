//! Register Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use audit::{AuditEntry, AuditSink, append_best_effort};
use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::token_pair::{TokenPair, issue_token_pair};
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::token::TokenService;
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub client: ClientInfo,
}

/// Register use case
pub struct RegisterUseCase<R, T, A>
where
    R: UserRepository + RefreshTokenRepository,
    T: TokenService,
    A: AuditSink,
{
    repo: Arc<R>,
    tokens: Arc<T>,
    audit: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<R, T, A> RegisterUseCase<R, T, A>
where
    R: UserRepository + RefreshTokenRepository + Sync,
    T: TokenService,
    A: AuditSink + Sync,
{
    pub fn new(repo: Arc<R>, tokens: Arc<T>, audit: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            tokens,
            audit,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<TokenPair> {
        let name = DisplayName::new(input.name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        // Argon2 is CPU-bound; keep it off the async workers
        let cost = self.config.password_hash_cost;
        let password_hash =
            tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw_password, &cost))
                .await
                .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))??;

        let user = User::new(
            email,
            name,
            password_hash,
            self.config.default_profile_image_url.clone(),
        );

        // A concurrent registration of the same e-mail surfaces here as EmailAlreadyExists
        UserRepository::create(self.repo.as_ref(), &user).await?;

        let pair = issue_token_pair(
            self.repo.as_ref(),
            self.tokens.as_ref(),
            &self.config,
            user.id,
        )
        .await?;

        append_best_effort(
            self.audit.as_ref(),
            AuditEntry::new(user.id, "user", user.id, "registered").with_client(&input.client),
        )
        .await;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(pair)
    }
}
