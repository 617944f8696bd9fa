//! Configuration structures
//!
//! Loaded by `doctorfinder_infra::config::loader` from the environment or a
//! JSON/TOML file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_PORT, DEFAULT_API_URL, DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE,
    DEFAULT_DOCUMENT_ENDPOINT, DEFAULT_IDENTITY_ENDPOINT, DEFAULT_STORAGE_PATH,
    DEFAULT_TOKEN_ENDPOINT,
};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Record API listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_API_PORT, environment: Environment::default() }
    }
}

/// Deployment environment; development mode exposes error detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Parse an environment name, accepting the usual short forms.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Relational store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: DEFAULT_DB_PATH.to_string(), pool_size: DEFAULT_DB_POOL_SIZE }
    }
}

/// Client-side settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the record API
    pub api_url: String,
    /// File holding the client's persisted local state
    pub storage_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_string(), storage_path: DEFAULT_STORAGE_PATH.to_string() }
    }
}

/// How the client obtains identity/document service settings.
///
/// `service` is the eager variant (known at build/start time); `config_url`
/// is the lazy variant, fetched once on first use. When both are present the
/// eager settings win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub service: Option<ServiceConfig>,
    #[serde(default)]
    pub config_url: Option<String>,
}

/// Connection settings for the identity/document service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    #[serde(alias = "api_key")]
    pub api_key: String,
    #[serde(default, alias = "auth_domain")]
    pub auth_domain: String,
    #[serde(alias = "project_id")]
    pub project_id: String,
    #[serde(default, alias = "storage_bucket")]
    pub storage_bucket: String,
    #[serde(default, alias = "messaging_sender_id")]
    pub messaging_sender_id: String,
    #[serde(default, alias = "app_id")]
    pub app_id: String,
    #[serde(default, alias = "measurement_id", skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
    #[serde(default = "default_identity_endpoint", alias = "identity_endpoint")]
    pub identity_endpoint: String,
    #[serde(default = "default_token_endpoint", alias = "token_endpoint")]
    pub token_endpoint: String,
    #[serde(default = "default_document_endpoint", alias = "document_endpoint")]
    pub document_endpoint: String,
}

impl ServiceConfig {
    /// Settings for `project_id` against the public service endpoints.
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_domain: String::new(),
            project_id: project_id.into(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            measurement_id: None,
            identity_endpoint: default_identity_endpoint(),
            token_endpoint: default_token_endpoint(),
            document_endpoint: default_document_endpoint(),
        }
    }

    /// Point every endpoint at one base URL (local emulators, tests).
    pub fn with_endpoint(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        self.identity_endpoint = base.clone();
        self.token_endpoint = base.clone();
        self.document_endpoint = base;
        self
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("app_id", &self.app_id)
            .field("identity_endpoint", &self.identity_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("document_endpoint", &self.document_endpoint)
            .finish_non_exhaustive()
    }
}

fn default_identity_endpoint() -> String {
    DEFAULT_IDENTITY_ENDPOINT.to_string()
}

fn default_token_endpoint() -> String {
    DEFAULT_TOKEN_ENDPOINT.to_string()
}

fn default_document_endpoint() -> String {
    DEFAULT_DOCUMENT_ENDPOINT.to_string()
}
