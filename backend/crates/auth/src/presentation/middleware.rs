//! Auth Middleware
//!
//! Bearer access-token authentication for protected routes.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::context::CurrentUser;
use std::sync::Arc;

use crate::domain::token::TokenService;
use crate::error::AuthError;

/// Middleware that requires a valid access token
///
/// On success the caller is placed in the request extensions as
/// [`CurrentUser`]; otherwise the request is answered with 401 UNAUTHORIZED.
pub async fn require_access_token<T>(
    State(tokens): State<Arc<T>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    T: TokenService + 'static,
{
    let token = bearer_token(req.headers()).ok_or(AuthError::Unauthorized)?;

    let user_id = tokens.verify_access(token).map_err(|e| {
        tracing::debug!(error = %e, "Access token rejected");
        AuthError::Unauthorized
    })?;

    req.extensions_mut().insert(CurrentUser::new(user_id));

    Ok(next.run(req).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
