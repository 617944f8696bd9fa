//! Credential protection

pub mod password;

pub use password::Argon2CredentialHasher;
