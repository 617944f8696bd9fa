//! Profile documents and their local cache

mod service;

pub use service::ProfileService;
