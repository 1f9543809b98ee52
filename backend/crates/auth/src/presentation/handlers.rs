//! HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use audit::AuditSink;
use kernel::context::CurrentUser;
use kernel::extract::JsonBody;
use kernel::response::Envelope;
use platform::client::ClientInfo;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutInput, LogoutUseCase, RefreshTokenInput, RefreshTokenUseCase,
    RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::error::AuthResult;
use crate::infra::jwt::JwtTokenService;
use crate::presentation::dto::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, TokenResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<R, A>
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub audit: Arc<A>,
    pub tokens: Arc<JwtTokenService>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: only the Arcs are cloned, R and A need not be Clone
impl<R, A> Clone for AuthAppState<R, A>
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            audit: self.audit.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R, A>(
    State(state): State<AuthAppState<R, A>>,
    client: ClientInfo,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.audit.clone(),
        state.config.clone(),
    );

    let pair = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            client,
        })
        .await?;

    Ok((StatusCode::CREATED, Envelope::new(TokenResponse::from(pair))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R, A>(
    State(state): State<AuthAppState<R, A>>,
    client: ClientInfo,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Envelope<TokenResponse>>
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.audit.clone(),
        state.config.clone(),
    );

    let pair = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
            client,
        })
        .await?;

    Ok(Envelope::new(pair.into()))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /auth/refresh
pub async fn refresh<R, A>(
    State(state): State<AuthAppState<R, A>>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> AuthResult<Envelope<TokenResponse>>
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let pair = use_case
        .execute(RefreshTokenInput {
            refresh_token: req.refresh_token,
        })
        .await?;

    Ok(Envelope::new(pair.into()))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout (requires access token)
pub async fn logout<R, A>(
    State(state): State<AuthAppState<R, A>>,
    current_user: CurrentUser,
    client: ClientInfo,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.audit.clone(),
    );

    use_case
        .execute(LogoutInput {
            user_id: current_user.user_id,
            refresh_token: req.refresh_token,
            client,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
