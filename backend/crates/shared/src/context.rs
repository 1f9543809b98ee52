//! Request context - the authenticated caller
//!
//! The authentication middleware places a [`CurrentUser`] into the request
//! extensions; protected handlers extract it.

use crate::id::UserId;

/// 認証済みの呼び出し元
///
/// アクセストークンの検証に成功したリクエストにのみ存在します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    /// トークンの `sub` から得たユーザー ID
    pub user_id: UserId,
}

impl CurrentUser {
    #[inline]
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| {
                crate::error::app_error::AppError::unauthorized("Authentication required")
            })
    }
}
