#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use doctorfinder_api::{router, ApiContext};
use doctorfinder_core::{CredentialHasher, DirectoryService, DoctorRepository, UserRepository};
use doctorfinder_domain::{
    Config, DatabaseConfig, Doctor, DoctorFinderError, Environment, NewDoctor, NewUser, Result,
    User,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a fresh SQLite store in a temporary directory.
pub struct TestApp {
    pub router: Router,
    pub context: Arc<ApiContext>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn new(environment: Environment) -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let mut config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("records.db").to_string_lossy().into_owned(),
                pool_size: 2,
            },
            ..Config::default()
        };
        config.server.environment = environment;

        let context = Arc::new(ApiContext::open(&config).expect("context should open"));
        Self { router: router(Arc::clone(&context)), context, _temp_dir: temp_dir }
    }
}

/// Router whose store fails every call.
pub fn unreachable_store_router(environment: Environment) -> Router {
    let directory = DirectoryService::new(
        Arc::new(UnreachableStore),
        Arc::new(UnreachableStore),
        Arc::new(PlainHasher),
    );
    router(Arc::new(ApiContext::with_directory(Arc::new(directory), environment)))
}

pub struct UnreachableStore;

fn unreachable() -> DoctorFinderError {
    DoctorFinderError::Database("connection pool error: timed out waiting for connection".into())
}

#[async_trait]
impl DoctorRepository for UnreachableStore {
    async fn list(&self) -> Result<Vec<Doctor>> {
        Err(unreachable())
    }

    async fn insert(&self, _doctor: NewDoctor) -> Result<Doctor> {
        Err(unreachable())
    }
}

#[async_trait]
impl UserRepository for UnreachableStore {
    async fn list(&self) -> Result<Vec<User>> {
        Err(unreachable())
    }

    async fn insert(&self, _user: NewUser) -> Result<User> {
        Err(unreachable())
    }
}

pub struct PlainHasher;

#[async_trait]
impl CredentialHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("hashed:{password}"))
    }
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).expect("request should build"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
    Response { status, headers, bytes: bytes.to_vec() }
}

pub struct Response {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl Response {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response should be JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}
