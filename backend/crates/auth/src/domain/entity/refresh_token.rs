//! Refresh Token Entity
//!
//! Persisted form of a refresh token. Only the SHA-256 fingerprint of the
//! token text is stored; the plaintext is handed to the client once.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{RefreshTokenId, UserId};

/// Fingerprint width (SHA-256)
pub const TOKEN_HASH_LEN: usize = 32;

/// Stored refresh token
///
/// Transitions active → revoked at most once; `revoked_at` is never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    pub user_id: UserId,
    pub token_hash: [u8; TOKEN_HASH_LEN],
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Create an active token expiring `ttl` after `now`
    pub fn issue(
        user_id: UserId,
        token_hash: [u8; TOKEN_HASH_LEN],
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RefreshTokenId::new(),
            user_id,
            token_hash,
            expires_at: now + ttl,
            revoked_at: None,
            created_at: now,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Expired strictly after `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue() {
        let now = Utc::now();
        let token = RefreshToken::issue(UserId::new(), [7u8; 32], Duration::days(30), now);
        assert_eq!(token.expires_at, now + Duration::days(30));
        assert!(!token.is_revoked());
        assert!(!token.is_expired(now));
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let token = RefreshToken::issue(UserId::new(), [0u8; 32], Duration::seconds(10), now);
        assert!(!token.is_expired(token.expires_at));
        assert!(token.is_expired(token.expires_at + Duration::milliseconds(1)));
    }
}
