use axum::http::{Method, header::HeaderName};
use thiserror::Error;

use crate::constants::MIN_SECRET_LENGTH;
use crate::models::{AuthConfig, Config, CorsConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.environment.is_development() {
        if config.auth.is_default_pepper() {
            warnings.push_with_hint(
                "AUTH_PASSWORD_PEPPER uses the built-in development value",
                "Set AUTH_PASSWORD_PEPPER before deploying outside Development",
            );
        }
    } else {
        enforce_secret(&config.auth)?;
    }

    if config.cors.is_enabled() {
        validate_cors(&config.cors)?;
    }

    if config.cors.is_wildcard_included() {
        warnings.push_with_hint(
            "CORS_ALLOWED_ORIGINS contains `*`; any site may call the API",
            "List the exact origins of the clients that need browser access",
        );
        if config.cors.allow_credentials {
            warnings.push(
                "CORS credentials allowed alongside wildcard origin; browsers will reject such configuration",
            );
        }
    }

    if config.database.primary_url.is_none() {
        warnings.push_with_hint(
            "No database connection configured",
            "Set DATABASE_URL, or DATABASE_HOST/DATABASE_USER/DATABASE_NAME",
        );
    }

    if config.database.min_connections > config.database.max_connections {
        warnings.push(format!(
            "DATABASE_MIN_CONNECTIONS ({}) exceeds DATABASE_MAX_CONNECTIONS ({}); the pool will be capped at the maximum",
            config.database.min_connections, config.database.max_connections
        ));
    }

    Ok(warnings)
}

fn enforce_secret(auth: &AuthConfig) -> Result<(), ConfigGuardRailError> {
    if auth.is_default_pepper() {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_PASSWORD_PEPPER",
            reason: "uses the default placeholder value".into(),
        });
    }

    if auth.password_pepper.len() < MIN_SECRET_LENGTH {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_PASSWORD_PEPPER",
            reason: format!("must be at least {MIN_SECRET_LENGTH} characters"),
        });
    }

    Ok(())
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_METHODS must include at least one HTTP method"
                    .into(),
        });
    }

    for method in &cors.allowed_methods {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{method}` in CORS_ALLOWED_METHODS"
                ),
            }
        })?;
    }

    for header in &cors.allowed_headers {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header name `{header}` in CORS_ALLOWED_HEADERS"
                ),
            }
        })?;
    }

    Ok(())
}
