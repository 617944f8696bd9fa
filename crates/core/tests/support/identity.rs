//! Fakes for the identity/document service ports

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use doctorfinder_core::{
    DocumentFields, DocumentStore, IdentityListener, IdentityProvider, ListenerRegistry,
    ProfileCacheStore, ServiceConfigSource, Subscription,
};
use doctorfinder_domain::{
    CachedProfile, DoctorFinderError, Identity, ProfileDocument, Result, ServiceConfig,
};
use parking_lot::Mutex;

/// Identity provider backed by a map of accounts.
///
/// By default `subscribe` reports the current identity right away. A
/// deferred provider stays silent until [`FakeIdentityProvider::resolve`].
pub struct FakeIdentityProvider {
    accounts: Mutex<HashMap<String, (String, Identity)>>,
    current: Mutex<Option<Identity>>,
    listeners: Arc<ListenerRegistry<Option<Identity>>>,
    deferred: bool,
    fail_sign_out: AtomicBool,
    next_uid: AtomicUsize,
    pub sign_up_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            listeners: ListenerRegistry::new(),
            deferred: false,
            fail_sign_out: AtomicBool::new(false),
            next_uid: AtomicUsize::new(1),
            sign_up_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
        }
    }

    pub fn deferred() -> Self {
        Self { deferred: true, ..Self::new() }
    }

    pub fn with_account(self, email: &str, password: &str) -> Self {
        let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::SeqCst));
        self.accounts
            .lock()
            .insert(email.to_string(), (password.to_string(), Identity::new(uid, email)));
        self
    }

    /// Start out signed in as `identity`.
    pub fn signed_in_as(self, identity: Identity) -> Self {
        *self.current.lock() = Some(identity);
        self
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::SeqCst);
    }

    /// Report the current identity to every listener.
    pub fn resolve(&self) {
        let current = self.current.lock().clone();
        self.listeners.notify(&current);
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.lock() = identity.clone();
        self.listeners.notify(&identity);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
        let identity = {
            let mut accounts = self.accounts.lock();
            if accounts.contains_key(email) {
                return Err(DoctorFinderError::Auth("EMAIL_EXISTS".into()));
            }
            let uid = format!("uid-{}", self.next_uid.fetch_add(1, Ordering::SeqCst));
            let identity = Identity::new(uid, email);
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            identity
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = match self.accounts.lock().get(email) {
            Some((stored, identity)) if stored == password => identity.clone(),
            _ => return Err(DoctorFinderError::Auth("INVALID_LOGIN_CREDENTIALS".into())),
        };
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self, _identity: &Identity) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(DoctorFinderError::Network("connection reset".into()));
        }
        self.set_current(None);
        Ok(())
    }

    fn subscribe(&self, listener: IdentityListener) -> Subscription {
        if !self.deferred {
            listener(&self.current.lock().clone());
        }
        self.listeners.register(move |identity| listener(identity))
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.lock().clone()
    }
}

/// Document store over a map keyed by `(collection, key)`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<(String, String), DocumentFields>>,
    fail_writes: AtomicBool,
    pub gets: AtomicUsize,
    pub writes: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, uid: &str, profile: &ProfileDocument) -> Self {
        let fields = match serde_json::to_value(profile) {
            Ok(serde_json::Value::Object(fields)) => fields,
            _ => DocumentFields::new(),
        };
        self.documents.lock().insert(("users".to_string(), uid.to_string()), fields);
        self
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn document(&self, collection: &str, key: &str) -> Option<DocumentFields> {
        self.documents.lock().get(&(collection.to_string(), key.to_string())).cloned()
    }

    fn check_writable(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DoctorFinderError::Network("store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<DocumentFields>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.document(collection, key))
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: DocumentFields,
    ) -> Result<()> {
        self.check_writable()?;
        self.documents.lock().insert((collection.to_string(), key.to_string()), fields);
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        key: &str,
        fields: DocumentFields,
    ) -> Result<()> {
        self.check_writable()?;
        let mut documents = self.documents.lock();
        let document = documents
            .get_mut(&(collection.to_string(), key.to_string()))
            .ok_or_else(|| DoctorFinderError::NotFound(format!("{collection}/{key}")))?;
        document.extend(fields);
        Ok(())
    }
}

/// Profile cache holding at most one entry.
#[derive(Default)]
pub struct MemoryProfileCache {
    entry: Mutex<Option<CachedProfile>>,
    fail_clear: AtomicBool,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, entry: CachedProfile) -> Self {
        *self.entry.lock() = Some(entry);
        self
    }

    pub fn fail_clear(&self) {
        self.fail_clear.store(true, Ordering::SeqCst);
    }

    pub fn entry(&self) -> Option<CachedProfile> {
        self.entry.lock().clone()
    }
}

#[async_trait]
impl ProfileCacheStore for MemoryProfileCache {
    async fn load(&self) -> Result<Option<CachedProfile>> {
        Ok(self.entry())
    }

    async fn store(&self, entry: &CachedProfile) -> Result<()> {
        *self.entry.lock() = Some(entry.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(DoctorFinderError::Internal("storage locked".into()));
        }
        *self.entry.lock() = None;
        Ok(())
    }
}

/// Config source that counts fetches and takes a moment to answer.
pub struct CountingConfigSource {
    pub fetches: AtomicUsize,
    failures_left: AtomicUsize,
    delay: Duration,
}

impl CountingConfigSource {
    pub fn new(delay: Duration) -> Self {
        Self { fetches: AtomicUsize::new(0), failures_left: AtomicUsize::new(0), delay }
    }

    /// Fail the first `count` fetches.
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }
}

#[async_trait]
impl ServiceConfigSource for CountingConfigSource {
    async fn fetch(&self) -> Result<ServiceConfig> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let failed = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failed {
            return Err(DoctorFinderError::Network("config endpoint unavailable".into()));
        }
        Ok(ServiceConfig::new("test-key", "test-project"))
    }
}
