//! Error responses
//!
//! Every failure is a 500 with a fixed body per action; the underlying error
//! is logged server-side. Only user creation adds `details`, and `stack` in
//! development.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use doctorfinder_domain::DoctorFinderError;
use serde_json::json;
use thiserror::Error;

use crate::utils::logging::log_action_failure;

/// Record API operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    FetchDoctors,
    CreateDoctor,
    FetchUsers,
    CreateUser,
}

impl ApiAction {
    /// Body `error` text for this action.
    pub fn message(self) -> &'static str {
        match self {
            Self::FetchDoctors => "Error fetching doctors",
            Self::CreateDoctor => "Error creating doctor",
            Self::FetchUsers => "Error fetching users",
            Self::CreateUser => "Error creating user",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FetchDoctors => "fetch_doctors",
            Self::CreateDoctor => "create_doctor",
            Self::FetchUsers => "fetch_users",
            Self::CreateUser => "create_user",
        }
    }
}

#[derive(Debug, Error)]
#[error("{}: {}", .action.message(), .source)]
pub struct ApiError {
    action: ApiAction,
    #[source]
    source: DoctorFinderError,
    development: bool,
}

impl ApiError {
    pub fn new(action: ApiAction, source: DoctorFinderError) -> Self {
        Self { action, source, development: false }
    }

    /// Include development-only detail in the response.
    pub fn in_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    pub fn action(&self) -> ApiAction {
        self.action
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_action_failure(self.action.label(), &self.source);

        let body = match self.action {
            ApiAction::CreateUser => {
                let mut body = json!({
                    "error": self.action.message(),
                    "details": self.source.message(),
                });
                if self.development {
                    body["stack"] = json!(format!("{:?}", self.source));
                }
                body
            }
            _ => json!({ "error": self.action.message() }),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
