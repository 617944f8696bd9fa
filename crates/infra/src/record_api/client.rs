use async_trait::async_trait;
use doctorfinder_core::DirectoryApi;
use doctorfinder_domain::{Doctor, DoctorFinderError, NewDoctor, NewUser, Result, User};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::InfraError;
use crate::http::HttpClient;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`DirectoryApi`] over HTTP
pub struct RecordApiClient {
    http: HttpClient,
    base_url: String,
}

impl RecordApiClient {
    /// Client for the record API at `base_url` (trailing slash ignored).
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send and decode; a non-success response surfaces the server's
    /// `error` message.
    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.http.send(request).await?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(|err| InfraError::from(err).into());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("Record API returned HTTP {}", status.as_u16()));
        debug!(status = status.as_u16(), %message, "Record API request failed");
        Err(DoctorFinderError::Network(message))
    }
}

#[async_trait]
impl DirectoryApi for RecordApiClient {
    #[instrument(skip(self))]
    async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        self.call(self.http.request(Method::GET, self.url("/api/doctors"))).await
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>> {
        self.call(self.http.request(Method::GET, self.url("/api/users"))).await
    }

    #[instrument(skip_all, fields(email = %doctor.email))]
    async fn create_doctor(&self, doctor: &NewDoctor) -> Result<Doctor> {
        self.call(self.http.request(Method::POST, self.url("/api/doctors")).json(doctor)).await
    }

    #[instrument(skip_all, fields(email = %user.email))]
    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.call(self.http.request(Method::POST, self.url("/api/users")).json(user)).await
    }
}
