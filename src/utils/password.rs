//! Password hashing helpers backed by bcrypt.
//!
//! bcrypt salts every hash and its cost factor is tunable; verification compares
//! in constant time with respect to the candidate password.
//!
//! bcrypt only reads the first [`MAX_PASSWORD_BYTES`] bytes of its input. Both
//! helpers refuse longer passwords with [`BcryptError::Truncation`] instead of
//! letting two passwords that share a prefix hash alike.

use bcrypt::BcryptError;

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// bcrypt input limit, in bytes of UTF-8 (not characters).
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a plaintext password with the given cost factor.
///
/// # Errors
///
/// Returns [`BcryptError::Truncation`] if the password is longer than
/// [`MAX_PASSWORD_BYTES`] bytes, and [`BcryptError::CostNotAllowed`] if the cost
/// is out of range.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::non_truncating_hash(password.as_bytes(), cost)
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns [`BcryptError::Truncation`] if the candidate is longer than
/// [`MAX_PASSWORD_BYTES`] bytes. Any other error means the stored hash is
/// malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::non_truncating_verify(password.as_bytes(), hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse", MIN_COST).unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same-password", MIN_COST).unwrap();
        let b = hash_password("same-password", MIN_COST).unwrap();

        assert_ne!(a, b);
        assert!(!a.contains("same-password"));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(hash_password("pw", MIN_COST - 1).is_err());
    }

    #[test]
    fn test_limit_counts_bytes_not_characters() {
        // 36 two-byte characters fill the limit exactly.
        let at_limit = "é".repeat(36);
        assert_eq!(at_limit.len(), MAX_PASSWORD_BYTES);
        let hash = hash_password(&at_limit, MIN_COST).unwrap();
        assert!(verify_password(&at_limit, &hash).unwrap());

        let over = "é".repeat(72);
        assert!(matches!(
            hash_password(&over, MIN_COST),
            Err(BcryptError::Truncation(144))
        ));
    }

    #[test]
    fn test_shared_prefix_does_not_verify() {
        let hash = hash_password(&"é".repeat(36), MIN_COST).unwrap();
        let longer = format!("{}DIFFERENT-SUFFIX", "é".repeat(36));

        assert!(matches!(
            verify_password(&longer, &hash),
            Err(BcryptError::Truncation(_))
        ));
    }

    #[test]
    fn test_malformed_hash_is_error() {
        assert!(verify_password("pw", "not-a-bcrypt-hash").is_err());
    }
}
