//! Client-side persisted state
//!
//! A single JSON file stands in for browser storage: the identity session and
//! the profile cache each live under their own key.

pub mod local_store;
pub mod profile_cache;

pub use local_store::LocalStore;
pub use profile_cache::LocalProfileCache;
