//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

pub use platform::password::PasswordHashCost;

/// Minimum accepted signing key length in bytes
pub const MIN_SIGNING_KEY_LEN: usize = 32;

/// Upper bound for either token lifetime (ten years)
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 3600;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for access tokens (HS256)
    pub signing_key: Vec<u8>,
    /// Access token lifetime (1 hour)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (30 days)
    pub refresh_token_ttl: Duration,
    /// Argon2id cost for new password hashes
    pub password_hash_cost: PasswordHashCost,
    /// Profile image assigned at registration
    pub default_profile_image_url: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::with_random_secret()
    }
}

impl AuthConfig {
    /// Create config with the given signing key and default lifetimes
    pub fn new(signing_key: impl Into<Vec<u8>>) -> Self {
        Self {
            signing_key: signing_key.into(),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(30 * 24 * 3600),
            password_hash_cost: PasswordHashCost::default(),
            default_profile_image_url: None,
        }
    }

    /// Create config with a random signing key (for development)
    pub fn with_random_secret() -> Self {
        Self::new(platform::crypto::random_bytes(MIN_SIGNING_KEY_LEN))
    }

    /// Random key and minimal hashing cost
    pub fn for_tests() -> Self {
        Self {
            password_hash_cost: PasswordHashCost::for_tests(),
            ..Self::with_random_secret()
        }
    }

    /// Refresh TTL as a chrono duration, for expiry arithmetic
    pub fn refresh_token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.refresh_token_ttl)
            .unwrap_or_else(|_| chrono::Duration::days(30))
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("password_hash_cost", &self.password_hash_cost)
            .field("default_profile_image_url", &self.default_profile_image_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new(vec![1u8; 32]);
        assert_eq!(config.access_token_ttl, Duration::from_secs(3600));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(2_592_000));
        assert_eq!(config.refresh_token_ttl_chrono(), chrono::Duration::days(30));
    }

    #[test]
    fn test_max_ttl_fits_timestamps() {
        let max = Duration::from_secs(MAX_TOKEN_TTL_SECS);
        assert!(chrono::Duration::from_std(max).is_ok());
        assert!(i64::try_from(MAX_TOKEN_TTL_SECS).is_ok());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = AuthConfig::new(b"super-secret-signing-key-0123456789".to_vec());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
