//! Auth Router

use axum::{Router, middleware, routing::post};
use std::sync::Arc;

use audit::AuditSink;

use crate::application::config::AuthConfig;
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::infra::jwt::JwtTokenService;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_access_token;

/// Create a generic Auth router for any repository implementation
///
/// `tokens` is shared with the other protected routers so that every
/// route verifies access tokens with the same key.
pub fn auth_router_generic<R, A>(
    repo: R,
    audit: A,
    tokens: Arc<JwtTokenService>,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + RefreshTokenRepository + Send + Sync + 'static,
    A: AuditSink + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        audit: Arc::new(audit),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/auth/logout", post(handlers::logout::<R, A>))
        .route_layer(middleware::from_fn_with_state(
            tokens,
            require_access_token::<JwtTokenService>,
        ));

    Router::new()
        .route("/auth/register", post(handlers::register::<R, A>))
        .route("/auth/login", post(handlers::login::<R, A>))
        .route("/auth/refresh", post(handlers::refresh::<R, A>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryAuthRepository;
    use audit::InMemoryAuditLog;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let config = AuthConfig::for_tests();
        let tokens = Arc::new(JwtTokenService::from_config(&config));
        auth_router_generic(
            InMemoryAuthRepository::new(),
            InMemoryAuditLog::new(),
            tokens,
            config,
        )
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_returns_created_envelope() {
        let response = app()
            .oneshot(post_json(
                "/auth/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "Password123!"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert!(body["data"]["accessToken"].is_string());
        assert!(body["data"]["refreshToken"].is_string());
        assert_eq!(body["data"]["expiresIn"], 3600);
        assert!(body["data"].get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_validation_error() {
        let response = app()
            .oneshot(post_json(
                "/auth/register",
                json!({"name": "Alice", "email": "alice@example.com", "password": "short"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let response = app()
            .oneshot(post_json(
                "/auth/login",
                json!({"email": "ghost@example.com", "password": "Password123!"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let response = app()
            .oneshot(post_json("/auth/refresh", json!({"refreshToken": "nope"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_logout_requires_access_token() {
        let response = app()
            .oneshot(post_json("/auth/logout", json!({"refreshToken": "anything"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_logout_with_access_token() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/auth/register",
                json!({"name": "Dana", "email": "dana@example.com", "password": "Password123!"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        let access = body["data"]["accessToken"].as_str().unwrap().to_string();
        let refresh = body["data"]["refreshToken"].as_str().unwrap().to_string();

        let mut request = post_json("/auth/logout", json!({"refreshToken": refresh}));
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {}", access).parse().unwrap(),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(post_json("/auth/refresh", json!({"refreshToken": refresh})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
