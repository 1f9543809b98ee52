//! JWT Token Service
//!
//! HS256 access tokens with `{sub, iat, exp}` claims and opaque
//! 256-bit refresh tokens fingerprinted with SHA-256.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::refresh_token::TOKEN_HASH_LEN;
use crate::domain::token::{IssuedRefreshToken, TokenService};
use crate::error::{AuthError, AuthResult};

/// Refresh token entropy in bytes (256 bits)
const REFRESH_TOKEN_BYTES: usize = 32;

/// Access token claims
#[derive(Debug, Serialize, Deserialize)]
struct AccessTokenClaims {
    /// User id
    sub: String,
    /// Issued at (unix seconds)
    iat: i64,
    /// Expiry (unix seconds)
    exp: i64,
}

/// HS256 implementation of [`TokenService`]
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
}

impl JwtTokenService {
    pub fn new(signing_key: &[u8], access_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            decoding_key: DecodingKey::from_secret(signing_key),
            validation,
            access_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.signing_key, config.access_token_ttl)
    }

    /// Sign an access token as if issued at `now`
    pub fn issue_access_at(&self, user_id: UserId, now: DateTime<Utc>) -> AuthResult<String> {
        let exp = i64::try_from(self.access_ttl.as_secs())
            .ok()
            .and_then(|ttl| now.timestamp().checked_add(ttl))
            .ok_or_else(|| AuthError::Internal("Access token lifetime out of range".to_string()))?;
        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Access token signing failed: {}", e)))
    }
}

impl TokenService for JwtTokenService {
    fn issue_access(&self, user_id: UserId) -> AuthResult<String> {
        self.issue_access_at(user_id, Utc::now())
    }

    fn verify_access(&self, token: &str) -> AuthResult<UserId> {
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        UserId::parse_str(&data.claims.sub).map_err(|_| AuthError::TokenInvalid)
    }

    fn issue_refresh(&self) -> IssuedRefreshToken {
        let plaintext =
            platform::crypto::to_base64_url(&platform::crypto::random_bytes(REFRESH_TOKEN_BYTES));
        let fingerprint = self.fingerprint(&plaintext);

        IssuedRefreshToken {
            plaintext,
            fingerprint,
        }
    }

    fn fingerprint(&self, plaintext: &str) -> [u8; TOKEN_HASH_LEN] {
        platform::crypto::sha256(plaintext.as_bytes())
    }

    fn access_ttl(&self) -> Duration {
        self.access_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn service() -> JwtTokenService {
        JwtTokenService::new(KEY, Duration::from_secs(3600))
    }

    #[test]
    fn test_access_roundtrip() {
        let tokens = service();
        let user_id = UserId::new();

        let token = tokens.issue_access(user_id).unwrap();
        assert_eq!(tokens.verify_access(&token).unwrap(), user_id);
    }

    #[test]
    fn test_expired_access_token() {
        let tokens = service();
        let two_hours_ago = Utc::now() - chrono::Duration::hours(2);

        let token = tokens.issue_access_at(UserId::new(), two_hours_ago).unwrap();
        assert!(matches!(
            tokens.verify_access(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_error() {
        let tokens = JwtTokenService::new(KEY, Duration::from_secs(u64::MAX));
        assert!(matches!(
            tokens.issue_access(UserId::new()),
            Err(AuthError::Internal(_))
        ));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = service().issue_access(UserId::new()).unwrap();
        let other = JwtTokenService::new(b"another-key-another-key-another-k", Duration::from_secs(3600));

        assert!(matches!(
            other.verify_access(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: UserId::new().to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();

        assert!(matches!(
            service().verify_access(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: "not-a-uuid".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY),
        )
        .unwrap();

        assert!(matches!(
            service().verify_access(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            service().verify_access("garbage"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn test_refresh_tokens() {
        let tokens = service();
        let a = tokens.issue_refresh();
        let b = tokens.issue_refresh();

        assert_ne!(a.plaintext, b.plaintext);
        assert_ne!(a.fingerprint, b.fingerprint);
        assert_eq!(a.plaintext.len(), 43);
        assert!(
            a.plaintext
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(tokens.fingerprint(&a.plaintext), a.fingerprint);
    }
}
