//! # Doctor Finder Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the relational store, the identity
//!   service, the document store and local storage
//! - The session state holder and its profile cache coordination
//! - Use cases for the record API and the patient flow
//! - View state for the directory and dashboard screens
//!
//! ## Architecture Principles
//! - Only depends on `doctorfinder-domain`
//! - No database, HTTP, or file-system code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod directory;
pub mod identity;
pub mod patient;
pub mod profile;
pub mod service_config;
pub mod session;
pub mod subscription;

// Re-export specific items to avoid ambiguity
pub use directory::ports::{CredentialHasher, DirectoryApi, DoctorRepository, UserRepository};
pub use directory::{DirectoryPage, DirectoryService, DoctorForm, UserForm};
pub use identity::ports::{
    DocumentFields, DocumentStore, IdentityListener, IdentityProvider, ProfileCacheStore,
    ServiceConfigSource,
};
pub use patient::{capitalize_words, Dashboard, LoginForm, NavLinks, PatientPortal, SignupForm};
pub use profile::ProfileService;
pub use service_config::ServiceConfigLoader;
pub use session::SessionHolder;
pub use subscription::{ListenerRegistry, Subscription};
