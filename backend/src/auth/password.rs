//! Password hashing using bcrypt
//!
//! Provides salted password hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. Async callers should use the
//! `*_async` variants, which run on tokio's blocking thread pool.

use thiserror::Error;
use video_api_shared::validation::MAX_PASSWORD_BYTES;

/// bcrypt work factor
pub const HASH_COST: u32 = 10;

/// Failure reasons for hashing and verification
///
/// A wrong password is not an error: `verify` returns `Ok(false)`.
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("password must not be empty")]
    EmptyPassword,

    #[error("password must be at most 72 bytes")]
    PasswordTooLong,

    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using bcrypt (blocking operation)
    ///
    /// Each call draws a fresh salt, so hashing the same password twice
    /// yields two different strings that both verify. bcrypt ignores
    /// everything past 72 bytes, so longer passwords are refused.
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::PasswordTooLong);
        }
        Ok(bcrypt::hash(password, HASH_COST)?)
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String, PasswordError> {
        tokio::task::spawn_blocking(move || Self::hash(&password)).await?
    }

    /// Verify a password against a stored hash (blocking operation)
    ///
    /// A password longer than `MAX_PASSWORD_BYTES` never matches: no stored
    /// hash was made from one.
    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(password, hash).map_err(|_| PasswordError::MalformedHash)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool, PasswordError> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secret123";
        let hash = PasswordService::hash(password).unwrap();

        assert!(PasswordService::verify(password, &hash).unwrap());
        assert!(!PasswordService::verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(PasswordService::verify(password, &hash1).unwrap());
        assert!(PasswordService::verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_hash_uses_configured_cost() {
        let hash = PasswordService::hash("secret123").unwrap();
        assert!(hash.starts_with("$2b$10$"), "unexpected hash prefix: {}", &hash[..7]);
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let hash = PasswordService::hash("plaintext-marker").unwrap();
        assert!(!hash.contains("plaintext-marker"));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            PasswordService::hash(""),
            Err(PasswordError::EmptyPassword)
        ));
        assert!(matches!(
            PasswordService::verify("", "$2b$10$abcdefghijklmnopqrstuv"),
            Err(PasswordError::EmptyPassword)
        ));
    }

    #[test]
    fn test_malformed_hash_is_error_not_false() {
        let result = PasswordService::verify("secret123", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(PasswordError::MalformedHash)));
    }

    #[test]
    fn test_overlong_password_rejected_by_hash() {
        let password = "a".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(
            PasswordService::hash(&password),
            Err(PasswordError::PasswordTooLong)
        ));
    }

    #[test]
    fn test_suffix_past_limit_does_not_verify() {
        let base = "a".repeat(MAX_PASSWORD_BYTES);
        let hash = PasswordService::hash(&base).unwrap();

        assert!(PasswordService::verify(&base, &hash).unwrap());
        assert!(!PasswordService::verify(&format!("{}extra", base), &hash).unwrap());
        assert!(!PasswordService::verify(&format!("{}Y", base), &hash).unwrap());
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone()).await.unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash).await.unwrap());
    }

    proptest! {
        // bcrypt is slow on purpose; keep the case count small
        #![proptest_config(ProptestConfig::with_cases(6))]

        #[test]
        fn prop_hash_then_verify_succeeds(password in "[ -~]{1,40}") {
            let hash = PasswordService::hash(&password).unwrap();
            prop_assert!(PasswordService::verify(&password, &hash).unwrap());
        }

        #[test]
        fn prop_other_password_fails(p1 in "[a-z0-9]{4,20}", p2 in "[a-z0-9]{4,20}") {
            prop_assume!(p1 != p2);
            let hash = PasswordService::hash(&p2).unwrap();
            prop_assert!(!PasswordService::verify(&p1, &hash).unwrap());
        }
    }
}
