//! Port interfaces for the directory
//!
//! The repositories back the record API; `DirectoryApi` is the client's view
//! of that API.

use async_trait::async_trait;
use doctorfinder_domain::{Doctor, NewDoctor, NewUser, Result, User};

/// Doctor persistence
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// All doctors, oldest first
    async fn list(&self) -> Result<Vec<Doctor>>;

    /// Store a doctor. `doctor.password` is already hashed.
    async fn insert(&self, doctor: NewDoctor) -> Result<Doctor>;
}

/// User persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, oldest first
    async fn list(&self) -> Result<Vec<User>>;

    /// Store a user. `user.password` is already hashed.
    async fn insert(&self, user: NewUser) -> Result<User>;
}

/// One-way credential hashing
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String>;
}

/// Record API as seen by the client
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_doctors(&self) -> Result<Vec<Doctor>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;
}
