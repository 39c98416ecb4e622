use axum::{
    Json,
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-api-version");
pub const SUPPORTED_VERSIONS_HEADER: HeaderName =
    HeaderName::from_static("api-supported-versions");

/// Represents an API version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
    /// Plain DTO bodies.
    V1,
    /// Request/response envelopes.
    V2,
}

impl ApiVersion {
    pub const SUPPORTED: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    /// Get the URL path segment for this version
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            ApiVersion::V1 => 1,
            ApiVersion::V2 => 2,
        }
    }

    /// Parse a version string into an ApiVersion
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "v1" | "1" | "1.0" => Some(ApiVersion::V1),
            "v2" | "2" | "2.0" => Some(ApiVersion::V2),
            _ => None,
        }
    }

    fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(|v| v.number().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// Extension type for storing API version in request
#[derive(Debug, Clone, Copy)]
pub struct RequestApiVersion(pub ApiVersion);

/// Outcome of inspecting a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathVersion {
    /// Not under `/api/`.
    Unversioned,
    Supported(ApiVersion),
    Unsupported(String),
}

/// Reads the `{version}` segment of `/api/{version}/...`.
fn version_from_path(path: &str) -> PathVersion {
    let mut segments = path.trim_start_matches('/').split('/');
    if segments.next() != Some("api") {
        return PathVersion::Unversioned;
    }

    match segments.next() {
        Some(segment) if segment.starts_with(['v', 'V']) => {
            match ApiVersion::parse(segment) {
                Some(version) => PathVersion::Supported(version),
                None => PathVersion::Unsupported(segment.to_string()),
            }
        }
        _ => PathVersion::Unversioned,
    }
}

/// Middleware for API version negotiation
pub async fn version_middleware(mut request: Request, next: Next) -> Response {
    let version = match version_from_path(request.uri().path()) {
        PathVersion::Unversioned => return next.run(request).await,
        PathVersion::Unsupported(requested) => {
            return UnsupportedVersionError { requested }.into_response();
        }
        PathVersion::Supported(version) => version,
    };

    request.extensions_mut().insert(RequestApiVersion(version));

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        API_VERSION_HEADER,
        HeaderValue::from_static(version.path_segment()),
    );
    stamp_supported_versions(&mut response);
    response
}

fn stamp_supported_versions(response: &mut Response) {
    if let Ok(value) = HeaderValue::from_str(&ApiVersion::supported_list()) {
        response
            .headers_mut()
            .insert(SUPPORTED_VERSIONS_HEADER, value);
    }
}

/// Response for unsupported API version
#[derive(Debug)]
pub struct UnsupportedVersionError {
    pub requested: String,
}

impl IntoResponse for UnsupportedVersionError {
    fn into_response(self) -> Response {
        tracing::warn!(requested = %self.requested, "unsupported API version");
        let supported: Vec<&str> = ApiVersion::SUPPORTED
            .iter()
            .map(ApiVersion::path_segment)
            .collect();
        let mut response = (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Unsupported API version",
                "requested_version": self.requested,
                "supported_versions": supported,
            })),
        )
            .into_response();
        stamp_supported_versions(&mut response);
        response
    }
}
