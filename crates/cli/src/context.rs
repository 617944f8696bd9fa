//! Explicit wiring of the client-side adapters
//!
//! Nothing here is global: the record API client, the identity client, the
//! document store, the profile cache and the session holder are built from
//! one [`Config`] and handed to the commands that need them.

use std::sync::Arc;

use doctorfinder_core::{
    DirectoryApi, PatientPortal, ProfileService, ServiceConfigLoader, SessionHolder,
};
use doctorfinder_domain::{Config, DoctorFinderError, Result};
use doctorfinder_infra::http::HttpClient;
use doctorfinder_infra::identity::{
    AccessTokenSource, HttpServiceConfigSource, IdentityToolkitClient, RestDocumentStore,
};
use doctorfinder_infra::storage::{LocalProfileCache, LocalStore};
use doctorfinder_infra::RecordApiClient;
use tracing::debug;

/// Identity-backed services, built once the service settings are resolved
pub struct PatientServices {
    pub identity: Arc<IdentityToolkitClient>,
    pub session: Arc<SessionHolder>,
    pub portal: PatientPortal,
}

/// Everything a command needs, built from one configuration
pub struct ClientContext {
    config: Config,
    http: HttpClient,
    storage: Arc<LocalStore>,
    service_config: Option<ServiceConfigLoader>,
}

impl ClientContext {
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::new()?;
        let storage = Arc::new(LocalStore::new(&config.client.storage_path));

        let service_config = match (&config.identity.service, &config.identity.config_url) {
            (Some(service), _) => Some(ServiceConfigLoader::eager(service.clone())),
            (None, Some(url)) => {
                debug!(url = %url, "identity settings will be fetched on first use");
                let source = HttpServiceConfigSource::new(http.clone(), url.clone());
                Some(ServiceConfigLoader::lazy(Arc::new(source)))
            }
            (None, None) => None,
        };

        Ok(Self { config, http, storage, service_config })
    }

    /// Record API client for the directory commands.
    pub fn directory_api(&self) -> Arc<dyn DirectoryApi> {
        Arc::new(RecordApiClient::new(self.http.clone(), self.config.client.api_url.clone()))
    }

    /// Resolve the identity settings and wire the patient flow over them.
    pub async fn patient(&self) -> Result<PatientServices> {
        let loader = self.service_config.as_ref().ok_or_else(|| {
            DoctorFinderError::Config(
                "Identity service is not configured: set DOCTORFINDER_IDENTITY_API_KEY and \
                 DOCTORFINDER_IDENTITY_PROJECT_ID, or DOCTORFINDER_IDENTITY_CONFIG_URL"
                    .into(),
            )
        })?;
        let service = loader.get().await?;

        let identity = Arc::new(IdentityToolkitClient::new(
            self.http.clone(),
            Arc::clone(&service),
            Arc::clone(&self.storage),
        ));
        let tokens: Arc<dyn AccessTokenSource> = identity.clone();
        let documents = Arc::new(RestDocumentStore::new(self.http.clone(), service, tokens));
        let cache = Arc::new(LocalProfileCache::new(Arc::clone(&self.storage)));

        let session = Arc::new(SessionHolder::start(identity.clone(), cache.clone()));
        let profiles = Arc::new(ProfileService::new(documents, cache));
        let portal = PatientPortal::new(Arc::clone(&session), profiles);

        Ok(PatientServices { identity, session, portal })
    }
}
