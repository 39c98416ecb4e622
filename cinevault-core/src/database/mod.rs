#[cfg(feature = "database")]
pub mod infrastructure;
pub mod ports;
#[cfg(feature = "database")]
pub mod postgres;

#[cfg(feature = "database")]
pub use postgres::{PoolOptions, PoolStats, PostgresDatabase};
