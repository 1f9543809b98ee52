//! In-memory Repository Implementations
//!
//! A single mutex guards the whole store, so every operation (including the
//! conditional revoke inside `rotate`) is atomic. Used by tests and by local
//! runs without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{RefreshTokenId, UserId};
use tokio::sync::Mutex;

use crate::domain::entity::{
    refresh_token::{RefreshToken, TOKEN_HASH_LEN},
    user::User,
};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct AuthStore {
    users: HashMap<UserId, User>,
    refresh_tokens: HashMap<RefreshTokenId, RefreshToken>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    store: Arc<Mutex<AuthStore>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored refresh token
    pub async fn refresh_tokens(&self) -> Vec<RefreshToken> {
        self.store
            .lock()
            .await
            .refresh_tokens
            .values()
            .cloned()
            .collect()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut store = self.store.lock().await;

        if store.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        store.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let store = self.store.lock().await;
        Ok(store.users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let store = self.store.lock().await;
        Ok(store.users.values().any(|u| &u.email == email))
    }
}

impl RefreshTokenRepository for InMemoryAuthRepository {
    async fn create(&self, token: &RefreshToken) -> AuthResult<()> {
        let mut store = self.store.lock().await;

        if store
            .refresh_tokens
            .values()
            .any(|t| t.token_hash == token.token_hash)
        {
            return Err(AuthError::Internal("Duplicate refresh token hash".to_string()));
        }

        store.refresh_tokens.insert(token.id, token.clone());
        Ok(())
    }

    async fn find_by_hash(
        &self,
        token_hash: &[u8; TOKEN_HASH_LEN],
    ) -> AuthResult<Option<RefreshToken>> {
        let store = self.store.lock().await;
        Ok(store
            .refresh_tokens
            .values()
            .find(|t| &t.token_hash == token_hash)
            .cloned())
    }

    async fn rotate(
        &self,
        consumed: &RefreshTokenId,
        replacement: &RefreshToken,
        now: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let mut store = self.store.lock().await;

        match store.refresh_tokens.get_mut(consumed) {
            Some(token) if token.revoked_at.is_none() => token.revoked_at = Some(now),
            _ => return Ok(false),
        }

        store
            .refresh_tokens
            .insert(replacement.id, replacement.clone());
        Ok(true)
    }

    async fn revoke_by_hash(
        &self,
        token_hash: &[u8; TOKEN_HASH_LEN],
        now: DateTime<Utc>,
    ) -> AuthResult<Option<RefreshToken>> {
        let mut store = self.store.lock().await;

        let revoked = store
            .refresh_tokens
            .values_mut()
            .find(|t| &t.token_hash == token_hash && t.revoked_at.is_none())
            .map(|t| {
                t.revoked_at = Some(now);
                t.clone()
            });

        Ok(revoked)
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let mut store = self.store.lock().await;
        let before = store.refresh_tokens.len();
        store.refresh_tokens.retain(|_, t| t.expires_at >= cutoff);
        Ok((before - store.refresh_tokens.len()) as u64)
    }
}
