use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    info!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "CineVault API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let pool = state.postgres.pool_stats();
    let status = match state.postgres.health_check().await {
        Ok(()) => {
            health_status["checks"]["database"] = json!({
                "status": "healthy",
                "pool_size": pool.size,
                "idle": pool.idle,
                "max_size": pool.max_size,
                "min_idle": pool.min_idle
            });
            StatusCode::OK
        }
        Err(e) => {
            warn!(error = %e, "database health check failed");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": e.to_string()
            });
            health_status["status"] = json!("unhealthy");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    (status, Json(health_status))
}
