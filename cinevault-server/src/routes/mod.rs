pub mod v1;
pub mod v2;

use crate::infra::app_state::AppState;
use axum::Router;

/// Create the main API router with all versions
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(v1::create_v1_router())
        .merge(v2::create_v2_router())
}
