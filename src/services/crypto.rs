use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::InternalError;

/// One-way credential hasher
///
/// Produces Argon2id hashes in PHC string format. No reverse operation is
/// exposed; verification exists only to support credential checks.
pub struct CredentialHasher {}

impl CredentialHasher {
    pub fn new() -> Self {
        Self {}
    }

    /// Hash a plaintext password with a fresh random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))
    }

    /// Verify a plaintext password against a stored PHC hash
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        PasswordHash::new(stored_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_produces_argon2_phc_string() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("secret123").unwrap();

        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = CredentialHasher::new();
        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();

        // Fresh salt per hash
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let hasher = CredentialHasher::new();
        let hash = hasher.hash("secret123").unwrap();

        assert!(hasher.verify("secret123", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify("secret123", "not-a-hash"));
    }
}
