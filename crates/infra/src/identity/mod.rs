//! REST adapters for the hosted identity and document service
//!
//! - [`IdentityToolkitClient`]: email/password accounts and ID tokens
//! - [`RestDocumentStore`]: per-user documents, authorized by those tokens
//! - [`HttpServiceConfigSource`]: remote connection settings for the lazy
//!   configuration variant

pub mod auth;
pub mod config_source;
pub mod documents;
pub mod toolkit;
pub mod value;

pub use auth::AccessTokenSource;
pub use config_source::HttpServiceConfigSource;
pub use documents::RestDocumentStore;
pub use toolkit::IdentityToolkitClient;

use doctorfinder_domain::{DoctorFinderError, Result};
use reqwest::Url;
use serde::Deserialize;

/// Error envelope shared by the identity and document REST APIs.
#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorBody {
    pub error: ServiceErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Message carried by an error response body, if it has the usual shape.
pub(crate) fn service_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .map(|body| body.error.message)
        .filter(|message| !message.is_empty())
}

/// `{base}{path}?key={api_key}`
pub(crate) fn keyed_url(base: &str, path: &str, api_key: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))
        .map_err(|e| DoctorFinderError::Config(format!("Invalid service endpoint: {}", e)))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_service_error_message() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(service_error_message(body).as_deref(), Some("EMAIL_EXISTS"));
        assert_eq!(service_error_message("<html>bad gateway</html>"), None);
        assert_eq!(service_error_message(r#"{"error":{"code":500}}"#), None);
    }

    #[test]
    fn keyed_url_appends_api_key() {
        let url = keyed_url("http://127.0.0.1:9099/", "/v1/accounts:signUp", "abc").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9099/v1/accounts:signUp?key=abc");
    }
}
