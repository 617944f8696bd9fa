//! Identity service connection settings, resolved once per process
//!
//! The settings are either supplied up front (eager) or fetched from a
//! [`ServiceConfigSource`] on first use (lazy). In the lazy case concurrent
//! first callers share one fetch; a failed fetch is not remembered.

use std::sync::Arc;

use doctorfinder_domain::{DoctorFinderError, Result, ServiceConfig};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::identity::ports::ServiceConfigSource;

/// Memoized [`ServiceConfig`]
pub struct ServiceConfigLoader {
    cell: OnceCell<Arc<ServiceConfig>>,
    source: Option<Arc<dyn ServiceConfigSource>>,
}

impl ServiceConfigLoader {
    /// Settings known at build/start time.
    pub fn eager(config: ServiceConfig) -> Self {
        Self { cell: OnceCell::new_with(Some(Arc::new(config))), source: None }
    }

    /// Settings fetched from `source` on first use.
    pub fn lazy(source: Arc<dyn ServiceConfigSource>) -> Self {
        Self { cell: OnceCell::new(), source: Some(source) }
    }

    /// Resolve the settings, fetching them if this is the first call.
    pub async fn get(&self) -> Result<Arc<ServiceConfig>> {
        let config = self
            .cell
            .get_or_try_init(|| async {
                let source = self.source.as_ref().ok_or_else(|| {
                    DoctorFinderError::Config("no identity service configuration source".to_string())
                })?;
                debug!("fetching identity service configuration");
                let config = source.fetch().await?;
                info!(project_id = %config.project_id, "identity service configuration loaded");
                Ok::<_, DoctorFinderError>(Arc::new(config))
            })
            .await?;
        Ok(Arc::clone(config))
    }

    /// Whether the settings are already resolved.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn eager_loader_is_initialized_up_front() {
        let loader = ServiceConfigLoader::eager(ServiceConfig::new("key", "project"));
        assert!(loader.is_initialized());

        let config = loader.get().await.unwrap();
        assert_eq!(config.project_id, "project");
    }
}
