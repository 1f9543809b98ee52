//! API Server Composition
//!
//! Wires the auth and training routers behind one access-token verifier.
//! The binary adds the database-bound pieces (readiness, CORS, tracing).

pub mod config;
pub mod health;

use std::sync::Arc;

use audit::AuditSink;
use auth::{AuthConfig, JwtTokenService, RefreshTokenRepository, UserRepository};
use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use training::TrainingRepository;

pub use config::ServerConfig;

/// Request body cap
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the application router for any repository implementation
pub fn build_router<AR, TR, A>(
    auth_repo: AR,
    training_repo: TR,
    audit: A,
    auth_config: AuthConfig,
) -> Router
where
    AR: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    TR: TrainingRepository + Send + Sync + 'static,
    A: AuditSink + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(JwtTokenService::from_config(&auth_config));

    let training = training::training_router_generic(training_repo, audit.clone()).route_layer(
        middleware::from_fn_with_state(
            tokens.clone(),
            auth::require_access_token::<JwtTokenService>,
        ),
    );

    Router::new()
        .route("/health", get(health::liveness))
        .merge(auth::auth_router_generic(auth_repo, audit, tokens, auth_config))
        .merge(training)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
