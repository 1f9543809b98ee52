//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{RefreshTokenId, UserId};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::{
    refresh_token::{RefreshToken, TOKEN_HASH_LEN},
    user::User,
};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, preferences::Preferences,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult, is_unique_violation};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                name,
                password_hash,
                profile_image_url,
                preferences,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.profile_image_url)
        .bind(Json(user.preferences))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailAlreadyExists
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                email,
                name,
                password_hash,
                profile_image_url,
                preferences,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

impl RefreshTokenRepository for PgAuthRepository {
    async fn create(&self, token: &RefreshToken) -> AuthResult<()> {
        insert_refresh_token(&self.pool, token).await
    }

    async fn find_by_hash(
        &self,
        token_hash: &[u8; TOKEN_HASH_LEN],
    ) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, user_id, token_hash, expires_at, revoked_at, created_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash.as_slice())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_refresh_token()).transpose()
    }

    async fn rotate(
        &self,
        consumed: &RefreshTokenId,
        replacement: &RefreshToken,
        now: DateTime<Utc>,
    ) -> AuthResult<bool> {
        // Dropping the transaction without commit rolls it back
        let mut tx = self.pool.begin().await?;

        let revoked = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE id = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(consumed.as_uuid())
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if revoked == 0 {
            return Ok(false);
        }

        insert_refresh_token(&mut *tx, replacement).await?;
        tx.commit().await?;

        Ok(true)
    }

    async fn revoke_by_hash(
        &self,
        token_hash: &[u8; TOKEN_HASH_LEN],
        now: DateTime<Utc>,
    ) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2
            WHERE token_hash = $1 AND revoked_at IS NULL
            RETURNING id, user_id, token_hash, expires_at, revoked_at, created_at
            "#,
        )
        .bind(token_hash.as_slice())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_refresh_token()).transpose()
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired refresh tokens");

        Ok(deleted)
    }
}

async fn insert_refresh_token<'e, E>(executor: E, token: &RefreshToken) -> AuthResult<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (
            id,
            user_id,
            token_hash,
            expires_at,
            revoked_at,
            created_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(token.id.as_uuid())
    .bind(token.user_id.as_uuid())
    .bind(token.token_hash.as_slice())
    .bind(token.expires_at)
    .bind(token.revoked_at)
    .bind(token.created_at)
    .execute(executor)
    .await?;

    Ok(())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    profile_image_url: Option<String>,
    preferences: Option<Json<Preferences>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            name: DisplayName::from_db(self.name),
            password_hash,
            profile_image_url: self.profile_image_url,
            preferences: self.preferences.map(|Json(p)| p).unwrap_or_default(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    user_id: Uuid,
    token_hash: Vec<u8>,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl RefreshTokenRow {
    fn into_refresh_token(self) -> AuthResult<RefreshToken> {
        let token_hash: [u8; TOKEN_HASH_LEN] = self
            .token_hash
            .try_into()
            .map_err(|_| AuthError::Internal("Invalid token_hash length".to_string()))?;

        Ok(RefreshToken {
            id: RefreshTokenId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            token_hash,
            expires_at: self.expires_at,
            revoked_at: self.revoked_at,
            created_at: self.created_at,
        })
    }
}
