//! Profile get-or-fetch and write-through updates
//!
//! The document store is the source of truth. The local cache holds one entry
//! for the signed-in identity; it is filled on a cold read, rewritten after
//! every successful update, and removed on sign-out.

use std::sync::Arc;

use chrono::{Duration, Utc};
use doctorfinder_domain::constants::USERS_COLLECTION;
use doctorfinder_domain::{
    Address, CachedProfile, DoctorFinderError, Identity, ProfileDocument, Result, SymptomSet,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::identity::ports::{DocumentFields, DocumentStore, ProfileCacheStore};

/// Dashboard profile access
pub struct ProfileService {
    documents: Arc<dyn DocumentStore>,
    cache: Arc<dyn ProfileCacheStore>,
    max_age: Option<Duration>,
}

impl ProfileService {
    /// Cache entries never expire; they live until sign-out.
    pub fn new(documents: Arc<dyn DocumentStore>, cache: Arc<dyn ProfileCacheStore>) -> Self {
        Self { documents, cache, max_age: None }
    }

    /// Treat cache entries older than `max_age` as missing.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Cached profile for `identity` if fresh, else the stored document.
    ///
    /// `Ok(None)` means the identity has no profile document yet; that
    /// outcome is not cached.
    pub async fn load(&self, identity: &Identity) -> Result<Option<ProfileDocument>> {
        if let Some(entry) = self.cached_entry(identity).await {
            debug!(uid = %identity.uid, "profile served from cache");
            return Ok(Some(entry.profile));
        }

        debug!(uid = %identity.uid, "fetching profile document");
        let Some(fields) = self.documents.get_document(USERS_COLLECTION, &identity.uid).await?
        else {
            info!(uid = %identity.uid, "no profile document");
            return Ok(None);
        };

        let profile: ProfileDocument = serde_json::from_value(Value::Object(fields))
            .map_err(|err| DoctorFinderError::Internal(format!("invalid profile document: {err}")))?;
        self.remember(identity, &profile).await;
        Ok(Some(profile))
    }

    /// Write the initial patient document for a new account.
    pub async fn create_profile(
        &self,
        identity: &Identity,
        name: &str,
        username: &str,
        email: &str,
    ) -> Result<ProfileDocument> {
        let profile = ProfileDocument::new_patient(name, username, email, Utc::now());
        self.documents
            .set_document(USERS_COLLECTION, &identity.uid, to_fields(&profile)?)
            .await?;
        info!(uid = %identity.uid, "profile document created");

        self.remember(identity, &profile).await;
        Ok(profile)
    }

    /// Replace the stored symptom selection. No other field is written.
    pub async fn save_symptoms(&self, identity: &Identity, symptoms: &SymptomSet) -> Result<()> {
        let mut fields = DocumentFields::new();
        fields.insert("symptoms".to_string(), to_value(symptoms)?);
        self.documents.update_document(USERS_COLLECTION, &identity.uid, fields).await?;
        info!(uid = %identity.uid, count = symptoms.len(), "symptoms saved");

        self.refresh_cached(identity, |profile| profile.symptoms = symptoms.clone()).await;
        Ok(())
    }

    /// Replace the stored address. No other field is written.
    pub async fn update_address(&self, identity: &Identity, address: &Address) -> Result<()> {
        let mut fields = DocumentFields::new();
        fields.insert("address".to_string(), to_value(address)?);
        self.documents.update_document(USERS_COLLECTION, &identity.uid, fields).await?;
        info!(uid = %identity.uid, "address updated");

        self.refresh_cached(identity, |profile| profile.address = Some(address.clone())).await;
        Ok(())
    }

    /// Drop the cached entry so the next load goes to the store.
    pub async fn invalidate(&self) -> Result<()> {
        self.cache.clear().await
    }

    async fn cached_entry(&self, identity: &Identity) -> Option<CachedProfile> {
        let entry = match self.cache.load().await {
            Ok(entry) => entry?,
            Err(err) => {
                warn!(error = %err, "profile cache unreadable; falling back to the store");
                return None;
            }
        };

        if !entry.belongs_to(&identity.uid) {
            debug!(uid = %identity.uid, "cached profile belongs to another identity");
            return None;
        }
        if let Some(max_age) = self.max_age {
            if Utc::now() - entry.cached_at > max_age {
                debug!(uid = %identity.uid, "cached profile expired");
                return None;
            }
        }
        Some(entry)
    }

    async fn remember(&self, identity: &Identity, profile: &ProfileDocument) {
        let entry = CachedProfile::new(identity.uid.clone(), profile.clone(), Utc::now());
        if let Err(err) = self.cache.store(&entry).await {
            warn!(error = %err, "failed to cache profile");
        }
    }

    // Apply a successful write to the cached copy, if there is one for this
    // identity. A miss is left alone; the next load fetches.
    async fn refresh_cached<F>(&self, identity: &Identity, apply: F)
    where
        F: FnOnce(&mut ProfileDocument),
    {
        let entry = match self.cache.load().await {
            Ok(Some(entry)) if entry.belongs_to(&identity.uid) => entry,
            Ok(_) => return,
            Err(err) => {
                warn!(error = %err, "profile cache unreadable; dropping it");
                if let Err(err) = self.cache.clear().await {
                    warn!(error = %err, "failed to clear profile cache");
                }
                return;
            }
        };

        let mut profile = entry.profile;
        apply(&mut profile);
        let entry = CachedProfile::new(identity.uid.clone(), profile, Utc::now());
        if let Err(err) = self.cache.store(&entry).await {
            warn!(error = %err, "failed to refresh cached profile; dropping it");
            if let Err(err) = self.cache.clear().await {
                warn!(error = %err, "failed to clear profile cache");
            }
        }
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|err| DoctorFinderError::Internal(format!("failed to encode document field: {err}")))
}

fn to_fields<T: Serialize>(value: &T) -> Result<DocumentFields> {
    match to_value(value)? {
        Value::Object(fields) => Ok(fields),
        other => Err(DoctorFinderError::Internal(format!(
            "document must be an object, got {other}"
        ))),
    }
}
