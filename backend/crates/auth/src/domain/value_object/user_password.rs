//! User Password Value Object
//!
//! Domain value object for user passwords with NIST SP 800-63B compliance.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Security Features
//! - Argon2id hashing (memory-hard) with configurable cost
//! - Automatic memory zeroization
//! - Constant-time comparison
//! - Unicode NFKC normalization

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashCost, PasswordPolicyError,
};
use std::fmt;
use std::sync::OnceLock;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// Rejects input shorter than 8 bytes; nothing else is enforced.
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, .. } => {
                AppError::unprocessable(format!("Password must be at least {} characters", min))
                    .with_code("VALIDATION_ERROR")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Login candidate; never rejected, a policy-violating candidate just fails to verify
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::candidate(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password for database storage
///
/// Stores password in Argon2id PHC string format.
/// Never serialized into a response and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password
    pub fn from_raw(raw: &RawPassword, cost: &PasswordHashCost) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(cost)
            .map_err(|e| AppError::internal(e.to_string()))?;

        Ok(Self(hashed))
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in database"))?;

        Ok(Self(hashed))
    }

    /// Get PHC string for database storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant time)
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }

    /// Process-wide hash of a random secret, verified in place of a
    /// missing account so that every login attempt runs Argon2 once
    ///
    /// Built on first use with `cost`; no plaintext ever matches it.
    pub fn dummy(cost: &PasswordHashCost) -> AppResult<&'static UserPassword> {
        static DUMMY: OnceLock<UserPassword> = OnceLock::new();

        if let Some(hash) = DUMMY.get() {
            return Ok(hash);
        }

        let secret = platform::crypto::to_base64_url(&platform::crypto::random_bytes(32));
        let hash = Self::from_raw(&RawPassword::candidate(secret), cost)?;
        Ok(DUMMY.get_or_init(|| hash))
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cost() -> PasswordHashCost {
        PasswordHashCost::for_tests()
    }

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Password123!".to_string()).is_ok());

        use platform::password::MIN_PASSWORD_LENGTH;
        let short_pass = "a".repeat(MIN_PASSWORD_LENGTH - 1);
        let err = RawPassword::new(short_pass).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.status_code(), 422);

        assert!(RawPassword::new("".to_string()).is_err());
        assert!(RawPassword::new("a".repeat(500)).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();

        assert!(hashed.verify(&raw));

        let wrong = RawPassword::candidate("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong));
    }

    #[test]
    fn test_short_candidate_never_verifies() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();
        assert!(!hashed.verify(&RawPassword::candidate("x".to_string())));
    }

    #[test]
    fn test_dummy_hash_is_shared_and_matches_nothing() {
        let first = UserPassword::dummy(&cost()).unwrap();
        let second = UserPassword::dummy(&cost()).unwrap();
        assert!(std::ptr::eq(first, second));

        assert!(first.as_phc_string().starts_with("$argon2id$"));
        assert!(!first.verify(&RawPassword::candidate("Password123!".to_string())));
        assert!(!first.verify(&RawPassword::candidate(String::new())));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let hashed = UserPassword::from_raw(&raw, &cost()).unwrap();
        let debug = format!("{:?}", hashed);
        assert!(debug.contains("HASH"));
        assert!(!debug.contains("argon2"));
    }
}
