//! Identity and document service boundary

pub mod ports;

pub use ports::{
    DocumentFields, DocumentStore, IdentityListener, IdentityProvider, ProfileCacheStore,
    ServiceConfigSource,
};
