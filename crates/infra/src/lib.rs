//! # Doctor Finder Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The SQLite store behind the Record API and its repositories
//! - Argon2 credential hashing
//! - Configuration loading
//! - HTTP adapters for the identity service, the document store and the
//!   Record API
//! - File-backed local storage for the client
//!
//! ## Architecture
//! - Implements traits defined in `doctorfinder-core`
//! - Contains all "impure" code (I/O, network, files)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod identity;
pub mod record_api;
pub mod security;
pub mod storage;

pub use database::{DbManager, SqliteDoctorRepository, SqliteUserRepository};
pub use errors::InfraError;
pub use http::HttpClient;
pub use identity::{
    AccessTokenSource, HttpServiceConfigSource, IdentityToolkitClient, RestDocumentStore,
};
pub use record_api::RecordApiClient;
pub use security::Argon2CredentialHasher;
pub use storage::{LocalProfileCache, LocalStore};
