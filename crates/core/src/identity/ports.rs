//! Port interfaces for the identity/document service
//!
//! The identity provider and document store are external. These traits are
//! the capability contract the patient flows rely on; adapters live in
//! `doctorfinder-infra`, in-memory fakes in the test support modules.

use async_trait::async_trait;
use doctorfinder_domain::{CachedProfile, Identity, Result, ServiceConfig};

use crate::subscription::Subscription;

/// Fields of a stored document, as a JSON object.
pub type DocumentFields = serde_json::Map<String, serde_json::Value>;

/// Callback invoked on every identity transition.
///
/// Receives `None` when the provider reports that nobody is signed in.
pub type IdentityListener = Box<dyn Fn(&Option<Identity>) + Send + Sync>;

/// External authentication service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity>;

    /// Terminate the session for `identity`
    async fn sign_out(&self, identity: &Identity) -> Result<()>;

    /// Register for identity transitions.
    ///
    /// Implementations report the identity they currently hold as the first
    /// event, once that is known, and one event per transition afterwards.
    fn subscribe(&self, listener: IdentityListener) -> Subscription;

    /// Latest identity known to the provider
    fn current_identity(&self) -> Option<Identity>;
}

/// Per-user document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document; `Ok(None)` when it does not exist
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<DocumentFields>>;

    /// Create or replace a document
    async fn set_document(&self, collection: &str, key: &str, fields: DocumentFields)
        -> Result<()>;

    /// Overwrite only the given top-level fields of an existing document
    async fn update_document(
        &self,
        collection: &str,
        key: &str,
        fields: DocumentFields,
    ) -> Result<()>;
}

/// Local persisted copy of the signed-in user's profile
#[async_trait]
pub trait ProfileCacheStore: Send + Sync {
    async fn load(&self) -> Result<Option<CachedProfile>>;

    async fn store(&self, entry: &CachedProfile) -> Result<()>;

    /// Remove the cached entry. Succeeds when nothing is cached.
    async fn clear(&self) -> Result<()>;
}

/// Network source of the service connection settings
#[async_trait]
pub trait ServiceConfigSource: Send + Sync {
    async fn fetch(&self) -> Result<ServiceConfig>;
}
