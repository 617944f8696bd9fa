//! # Doctor Finder Record API
//!
//! HTTP service over the doctor and user directory.
//!
//! This crate contains:
//! - The axum router and its handlers
//! - Error responses with the fixed JSON bodies clients rely on
//! - The application context (dependency wiring)
//! - Logging setup and the server entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Handlers only talk to `DirectoryService`

pub mod context;
pub mod error;
pub mod routes;
pub mod server;
pub mod utils;

pub use context::ApiContext;
pub use error::{ApiAction, ApiError};
pub use routes::router;
pub use server::serve;
