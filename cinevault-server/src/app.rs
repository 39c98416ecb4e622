use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, Uri},
    middleware,
    routing::get,
};
use cinevault_config::CorsConfig;
use cinevault_core::api_routes;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    handlers::probes::{health_handler, ping_handler},
    infra::{app_state::AppState, errors::AppError, middleware::request_timer},
    routes,
    versioning::version_middleware,
};

/// Builds the allow-list CORS layer. Entries that fail to parse were already
/// rejected by the configuration guard rails and are skipped here.
fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.is_wildcard_included() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            cors.allowed_origins
                .iter()
                .filter_map(|s| HeaderValue::from_str(s).ok()),
        )
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| Method::from_bytes(m.as_bytes()).ok())
        .collect();
    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| HeaderName::from_bytes(h.as_bytes()).ok())
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers));

    if cors.allow_credentials {
        if cors.is_wildcard_included() {
            warn!("ignoring CORS allow_credentials together with a wildcard origin");
        } else {
            layer = layer.allow_credentials(true);
        }
    }

    layer
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("No route for {}", uri.path()))
}

pub fn create_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route(api_routes::PING, get(ping_handler))
        .route(api_routes::HEALTH, get(health_handler))
        .merge(routes::create_api_router())
        .fallback(route_not_found)
        // Layers run outer to inner in reverse order of declaration.
        .layer(middleware::from_fn(version_middleware))
        .layer(middleware::from_fn(request_timer))
        .layer(TraceLayer::new_for_http());

    // A CORS layer answers preflight OPTIONS itself, which would shadow the
    // v2 envelope reads, so it is only added for configured origins.
    let cors = &state.config().cors;
    if cors.is_enabled() {
        app = app.layer(build_cors_layer(cors));
    }

    app.with_state(state)
}
