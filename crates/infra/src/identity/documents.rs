//! Document REST store
//!
//! Documents live at
//! `{endpoint}/v1/projects/{project}/databases/(default)/documents/{collection}/{key}`.
//! Every request carries the signed-in user's ID token.

use std::sync::Arc;

use async_trait::async_trait;
use doctorfinder_core::{DocumentFields, DocumentStore};
use doctorfinder_domain::{DoctorFinderError, Result, ServiceConfig};
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::auth::AccessTokenSource;
use super::service_error_message;
use super::value::{decode_fields, encode_fields};
use crate::errors::InfraError;
use crate::http::HttpClient;

#[derive(Deserialize)]
struct DocumentBody {
    #[serde(default)]
    fields: Map<String, Value>,
}

/// [`DocumentStore`] over the document service's REST API
pub struct RestDocumentStore {
    http: HttpClient,
    config: Arc<ServiceConfig>,
    tokens: Arc<dyn AccessTokenSource>,
}

impl RestDocumentStore {
    pub fn new(
        http: HttpClient,
        config: Arc<ServiceConfig>,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self { http, config, tokens }
    }

    fn document_url(&self, collection: &str, key: &str) -> Result<Url> {
        let base = format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.config.document_endpoint.trim_end_matches('/'),
            self.config.project_id
        );
        let mut url = Url::parse(&base)
            .map_err(|e| DoctorFinderError::Config(format!("Invalid document endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DoctorFinderError::Config("Invalid document endpoint".into()))?
            .push(collection)
            .push(key);
        Ok(url)
    }

    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn patch(&self, url: Url, fields: &DocumentFields) -> Result<()> {
        let body = json!({ "fields": encode_fields(fields) });
        let request = self.authorized(Method::PATCH, url).await?.json(&body);
        let response = self.http.send(request).await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(response).await)
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get_document(&self, collection: &str, key: &str) -> Result<Option<DocumentFields>> {
        let url = self.document_url(collection, key)?;
        let request = self.authorized(Method::GET, url).await?;
        let response = self.http.send(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(collection, key, "document not found");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: DocumentBody = response.json().await.map_err(InfraError::from)?;
        decode_fields(&body.fields).map(Some)
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        fields: DocumentFields,
    ) -> Result<()> {
        let url = self.document_url(collection, key)?;
        self.patch(url, &fields).await?;
        debug!(collection, key, "document written");
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        key: &str,
        fields: DocumentFields,
    ) -> Result<()> {
        let mut url = self.document_url(collection, key)?;
        {
            let mut query = url.query_pairs_mut();
            for name in fields.keys() {
                query.append_pair("updateMask.fieldPaths", name);
            }
            query.append_pair("currentDocument.exists", "true");
        }

        self.patch(url, &fields).await?;
        debug!(collection, key, fields = fields.len(), "document updated");
        Ok(())
    }
}

async fn error_from_response(response: Response) -> DoctorFinderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = service_error_message(&body)
        .unwrap_or_else(|| format!("document service returned HTTP {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DoctorFinderError::Auth(message),
        StatusCode::NOT_FOUND => DoctorFinderError::NotFound(message),
        status if status.is_client_error() => DoctorFinderError::InvalidInput(message),
        _ => DoctorFinderError::Network(message),
    }
}
