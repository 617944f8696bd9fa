use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use doctorfinder_domain::{DoctorFinderError, NewUser, User};
use tracing::debug;

use crate::context::ApiContext;
use crate::error::{ApiAction, ApiError};

pub async fn list_users(
    State(context): State<Arc<ApiContext>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = context
        .directory
        .list_users()
        .await
        .map_err(|err| ApiError::new(ApiAction::FetchUsers, err))?;
    debug!(count = users.len(), "users listed");
    Ok(Json(users))
}

pub async fn create_user(
    State(context): State<Arc<ApiContext>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let development = context.environment.is_development();
    let fail = |err| ApiError::new(ApiAction::CreateUser, err).in_development(development);

    let Json(user) =
        payload.map_err(|rejection| fail(DoctorFinderError::InvalidInput(rejection.body_text())))?;
    let created = context.directory.create_user(user).await.map_err(fail)?;
    Ok(Json(created))
}
