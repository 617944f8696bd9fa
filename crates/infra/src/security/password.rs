//! Argon2 credential hashing for directory records
//!
//! Directory signups carry a password. Only its argon2id PHC string is ever
//! persisted.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use doctorfinder_core::CredentialHasher;
use doctorfinder_domain::{DoctorFinderError, Result};
use tokio::task;

use crate::errors::InfraError;

/// Argon2id hasher with the crate's default parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash synchronously. Prefer the async [`CredentialHasher::hash`] on
    /// the runtime.
    pub fn hash_blocking(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(InfraError::from)?;
        Ok(hash.to_string())
    }

    /// Check `password` against a stored PHC string.
    pub fn verify(password: &str, stored: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored).map_err(InfraError::from)?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        task::spawn_blocking(move || Self::hash_blocking(&password))
            .await
            .map_err(|err| DoctorFinderError::Internal(format!("Task join error: {err}")))?
    }
}
