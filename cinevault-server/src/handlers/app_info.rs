//! Version-independent informational endpoints.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::info;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentResponse {
    pub environment_name: String,
}

pub async fn environment(State(state): State<AppState>) -> Json<EnvironmentResponse> {
    let environment_name = state.config().environment.to_string();
    info!(environment = %environment_name, "environment requested");
    Json(EnvironmentResponse { environment_name })
}

/// Always fails; exercises the 500 path end to end.
pub async fn throw_exception() -> AppResult<()> {
    Err(AppError::internal("This method should never be called"))
}

pub async fn old_endpoint() -> Json<&'static str> {
    Json("Old version endpoint")
}

pub async fn new_endpoint() -> Json<&'static str> {
    Json("New version endpoint")
}
