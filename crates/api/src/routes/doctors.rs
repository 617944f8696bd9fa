use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use doctorfinder_domain::{Doctor, DoctorFinderError, NewDoctor};
use tracing::debug;

use crate::context::ApiContext;
use crate::error::{ApiAction, ApiError};

pub async fn list_doctors(
    State(context): State<Arc<ApiContext>>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    let doctors = context
        .directory
        .list_doctors()
        .await
        .map_err(|err| ApiError::new(ApiAction::FetchDoctors, err))?;
    debug!(count = doctors.len(), "doctors listed");
    Ok(Json(doctors))
}

pub async fn create_doctor(
    State(context): State<Arc<ApiContext>>,
    payload: Result<Json<NewDoctor>, JsonRejection>,
) -> Result<Json<Doctor>, ApiError> {
    let development = context.environment.is_development();
    let fail = |err| ApiError::new(ApiAction::CreateDoctor, err).in_development(development);

    let Json(doctor) =
        payload.map_err(|rejection| fail(DoctorFinderError::InvalidInput(rejection.body_text())))?;
    let created = context.directory.create_doctor(doctor).await.map_err(fail)?;
    Ok(Json(created))
}
