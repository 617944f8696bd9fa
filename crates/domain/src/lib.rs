//! # Doctor Finder Domain
//!
//! Business domain types and models for Doctor Finder.
//!
//! This crate contains:
//! - Directory records (doctors, users) served by the record API
//! - Identity, session and profile-document types used by the patient flow
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Doctor Finder crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
