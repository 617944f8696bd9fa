use std::sync::Arc;

use async_trait::async_trait;
use doctorfinder_core::ProfileCacheStore;
use doctorfinder_domain::constants::PROFILE_CACHE_KEY;
use doctorfinder_domain::{CachedProfile, Result};

use super::LocalStore;

/// Profile cache kept in local storage under `userCache`
#[derive(Debug, Clone)]
pub struct LocalProfileCache {
    store: Arc<LocalStore>,
}

impl LocalProfileCache {
    /// Cache kept under the profile key of `store`.
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileCacheStore for LocalProfileCache {
    async fn load(&self) -> Result<Option<CachedProfile>> {
        self.store.get(PROFILE_CACHE_KEY)
    }

    async fn store(&self, entry: &CachedProfile) -> Result<()> {
        self.store.set(PROFILE_CACHE_KEY, entry)
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove(PROFILE_CACHE_KEY)
    }
}
