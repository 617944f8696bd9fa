//! Remote service settings

use async_trait::async_trait;
use doctorfinder_core::ServiceConfigSource;
use doctorfinder_domain::{Result, ServiceConfig};
use reqwest::Method;
use tracing::debug;

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Fetches [`ServiceConfig`] JSON from a URL
pub struct HttpServiceConfigSource {
    http: HttpClient,
    url: String,
}

impl HttpServiceConfigSource {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }
}

#[async_trait]
impl ServiceConfigSource for HttpServiceConfigSource {
    async fn fetch(&self) -> Result<ServiceConfig> {
        debug!(url = %self.url, "fetching service configuration");
        let response = self.http.send_checked(self.http.request(Method::GET, &self.url)).await?;
        let config = response.json::<ServiceConfig>().await.map_err(InfraError::from)?;
        Ok(config)
    }
}
