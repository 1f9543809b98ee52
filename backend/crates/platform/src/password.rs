//! Password Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id hashing with configurable cost (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Cost parameters are encoded in the PHC string, so raising them
//!   never invalidates existing hashes

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length in UTF-8 bytes of the raw input
pub const MIN_PASSWORD_LENGTH: usize = 8;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Cost parameters rejected by Argon2
    #[error("Invalid hash parameters: {0}")]
    InvalidParameters(String),

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Hash cost
// ============================================================================

/// Argon2id cost parameters
///
/// Defaults follow the OWASP recommendation: m=19456 (19 MiB), t=2, p=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes (time cost)
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordHashCost {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl PasswordHashCost {
    /// Minimal cost, for tests only
    pub fn for_tests() -> Self {
        Self {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParameters(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// This type ensures that password data is securely erased from memory
/// when the value is dropped, preventing memory inspection attacks.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordHashCost};
///
/// let password = ClearTextPassword::new("Password123!".to_string()).unwrap();
/// let hashed = password.hash(&PasswordHashCost::for_tests()).unwrap();
/// assert!(hashed.verify(&password));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// The only rule is the minimum length, counted in bytes of the input
    /// as received. Unicode is normalized using NFKC afterwards.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let actual = raw.len();

        if actual < MIN_PASSWORD_LENGTH {
            let mut raw = raw;
            raw.zeroize();
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual,
            });
        }

        Ok(Self::candidate(raw))
    }

    /// Wrap a login candidate without applying the policy
    ///
    /// A candidate that would fail the policy simply never verifies.
    pub fn candidate(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id with a fresh 128-bit salt
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, cost: &PasswordHashCost) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = cost
            .hasher()?
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// This type stores the Argon2id hash in PHC format, which includes:
/// - Algorithm identifier
/// - Version
/// - Parameters (memory, iterations, parallelism)
/// - Salt
/// - Hash
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Parameters are read back from the PHC string. Argon2 compares the
    /// digests in constant time.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
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
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        ));
    }

    #[test]
    fn test_password_exactly_minimum() {
        assert!(ClearTextPassword::new("abcdefgh".to_string()).is_ok());
        assert!(ClearTextPassword::new("abcdefg".to_string()).is_err());
    }

    #[test]
    fn test_length_counts_raw_bytes() {
        // 4 code points, 12 bytes
        assert!(ClearTextPassword::new("日本語日".to_string()).is_ok());
        // "e" + combining acute, 4 times: 8 code points, 12 bytes
        assert!(ClearTextPassword::new("e\u{301}".repeat(4)).is_ok());
        assert!(matches!(
            ClearTextPassword::new("日本".to_string()),
            Err(PasswordPolicyError::TooShort { min: 8, actual: 6 })
        ));
    }

    #[test]
    fn test_no_upper_bound_or_character_rules() {
        assert!(ClearTextPassword::new("a".repeat(200)).is_ok());
        assert!(ClearTextPassword::new("        ".to_string()).is_ok());
        assert!(ClearTextPassword::new("Password\u{0007}123".to_string()).is_ok());
    }

    #[test]
    fn test_valid_password() {
        assert!(ClearTextPassword::new("Password123!".to_string()).is_ok());
    }

    #[test]
    fn test_unicode_password() {
        let result = ClearTextPassword::new("パスワード安全です!".to_string());
        assert!(result.is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(&cost()).unwrap();

        assert!(hashed.verify(&password));

        let wrong_password = ClearTextPassword::candidate("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong_password));
    }

    #[test]
    fn test_hash_is_salted() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let a = password.hash(&cost()).unwrap();
        let b = password.hash(&cost()).unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
    }

    #[test]
    fn test_hash_records_cost() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(&cost()).unwrap();
        assert!(hashed.as_phc_string().starts_with("$argon2id$v=19$m=256,t=1,p=1$"));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let bad = PasswordHashCost {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        };
        assert!(matches!(
            password.hash(&bad),
            Err(PasswordHashError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_nfkc_normalization_applies_to_candidate() {
        // Fullwidth "Ａ" normalizes to ASCII "A"
        let password = ClearTextPassword::new("Ａbcdefgh1".to_string()).unwrap();
        let hashed = password.hash(&cost()).unwrap();
        assert!(hashed.verify(&ClearTextPassword::candidate("Abcdefgh1".to_string())));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(&cost()).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password));
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = HashedPassword::from_phc_string("not_a_valid_hash");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::candidate("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = ClearTextPassword::new("TestPassword123!".to_string())
            .unwrap()
            .hash(&cost())
            .unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
