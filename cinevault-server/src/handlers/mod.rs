//! HTTP request handlers organized by API version

pub mod app_info;
pub mod probes;
pub mod v1;
pub mod v2;

use std::sync::Arc;

use cinevault_core::domain::{UserRecord, UserRequest, Validate};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// Validates `request` and hashes its password off the async executor.
pub(crate) async fn user_record(
    state: &AppState,
    request: UserRequest,
) -> AppResult<UserRecord> {
    request.validate()?;

    let crypto = Arc::clone(&state.password_crypto);
    let UserRequest {
        username,
        email,
        password,
    } = request;

    let password_hash =
        tokio::task::spawn_blocking(move || crypto.hash_password(&password))
            .await
            .map_err(|err| AppError::internal(format!("hashing task failed: {err}")))?
            .map_err(|err| {
                tracing::error!(error = %err, "password hashing failed");
                AppError::internal("Failed to process password")
            })?;

    Ok(UserRecord {
        username,
        email,
        password_hash,
    })
}
