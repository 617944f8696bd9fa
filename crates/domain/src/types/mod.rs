//! Domain types and models
//!
//! Two unconnected data paths exist: directory records (doctors, users) owned
//! by the record API's relational store, and identity/profile documents owned
//! by the external identity and document service.

pub mod directory;
pub mod profile;
pub mod session;

pub use directory::{Doctor, NewDoctor, NewUser, User};
pub use profile::{Address, CachedProfile, ProfileDocument, Role, Symptom, SymptomSet};
pub use session::{Identity, SessionState};
