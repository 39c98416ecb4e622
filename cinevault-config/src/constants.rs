/// Placeholder pepper used when none is configured. Rejected outside
/// development environments.
pub const DEFAULT_PASSWORD_PEPPER: &str = "cinevault-dev-pepper-change-me";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

pub const DEFAULT_ENVIRONMENT: &str = "Production";

/// Minimum pepper length accepted outside development.
pub const MIN_SECRET_LENGTH: usize = 32;

pub const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["cinevault.toml", "config/cinevault.toml"];
