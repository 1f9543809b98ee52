//! Login Use Case
//!
//! Unknown e-mail and wrong password produce the same error.

use std::sync::Arc;

use audit::{AuditEntry, AuditSink, append_best_effort};
use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::token_pair::{TokenPair, issue_token_pair};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::token::TokenService;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub client: ClientInfo,
}

/// Login use case
pub struct LoginUseCase<R, T, A>
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

impl<R, T, A> LoginUseCase<R, T, A>
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

    pub async fn execute(&self, input: LoginInput) -> AuthResult<TokenPair> {
        // A malformed e-mail cannot belong to anyone
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.repo.find_by_email(&email).await?;

        // An unknown e-mail is checked against a dummy hash so both
        // failures cost one Argon2 verification
        let candidate = RawPassword::candidate(input.password);
        let stored = user.as_ref().map(|user| user.password_hash.clone());
        let cost = self.config.password_hash_cost;
        let verified = tokio::task::spawn_blocking(move || -> AuthResult<bool> {
            let hash = match &stored {
                Some(hash) => hash,
                None => UserPassword::dummy(&cost)?,
            };
            Ok(hash.verify(&candidate))
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))??;

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let pair = issue_token_pair(
            self.repo.as_ref(),
            self.tokens.as_ref(),
            &self.config,
            user.id,
        )
        .await?;

        append_best_effort(
            self.audit.as_ref(),
            AuditEntry::new(user.id, "user", user.id, "logged_in").with_client(&input.client),
        )
        .await;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::infra::{InMemoryAuthRepository, JwtTokenService};
    use audit::InMemoryAuditLog;

    struct Fixture {
        login: LoginUseCase<InMemoryAuthRepository, JwtTokenService, InMemoryAuditLog>,
        register: RegisterUseCase<InMemoryAuthRepository, JwtTokenService, InMemoryAuditLog>,
        tokens: Arc<JwtTokenService>,
        audit: InMemoryAuditLog,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let audit = InMemoryAuditLog::new();
        let config = Arc::new(AuthConfig::for_tests());
        let tokens = Arc::new(JwtTokenService::from_config(&config));
        let audit_arc = Arc::new(audit.clone());

        Fixture {
            login: LoginUseCase::new(repo.clone(), tokens.clone(), audit_arc.clone(), config.clone()),
            register: RegisterUseCase::new(repo, tokens.clone(), audit_arc, config),
            tokens,
            audit,
        }
    }

    async fn register(f: &Fixture, email: &str) {
        f.register
            .execute(RegisterInput {
                name: "Alice".to_string(),
                email: email.to_string(),
                password: "Password123!".to_string(),
                client: ClientInfo::default(),
            })
            .await
            .unwrap();
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
            client: ClientInfo::default(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let f = fixture();
        register(&f, "alice@example.com").await;

        let pair = f
            .login
            .execute(input("alice@example.com", "Password123!"))
            .await
            .unwrap();

        assert!(f.tokens.verify_access(&pair.access_token).is_ok());
        assert_eq!(
            f.audit.event_names().await,
            vec!["user.registered", "user.logged_in"]
        );
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let f = fixture();
        register(&f, "alice@example.com").await;

        let unknown = f
            .login
            .execute(input("nobody@example.com", "Password123!"))
            .await
            .unwrap_err();
        let wrong = f
            .login
            .execute(input("alice@example.com", "Password124!"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_unknown_email_never_matches_dummy_hash() {
        let f = fixture();

        for password in ["", "Password123!", "日本語日"] {
            let err = f
                .login
                .execute(input("ghost@example.com", password))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert!(f.audit.event_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_email_is_case_exact() {
        let f = fixture();
        register(&f, "alice@example.com").await;

        let err = f
            .login
            .execute(input("Alice@example.com", "Password123!"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_malformed_email_is_invalid_credentials() {
        let f = fixture();
        let err = f.login.execute(input("garbage", "x")).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
