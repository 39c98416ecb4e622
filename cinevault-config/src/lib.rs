//! Configuration for the CineVault API server.
//!
//! Values are layered: a `.env` file is loaded into the process environment,
//! environment variables are gathered, and an optional TOML file fills in
//! whatever the environment leaves unset. The composed [`Config`] then passes
//! through guard rails that reject unsafe production settings.

pub mod constants;
pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    EnvironmentName, ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
