//! # CineVault Server
//!
//! Versioned REST API for the CineVault movie-review catalog.
//!
//! ## Overview
//!
//! - **v1** (`/api/v1/...`): plain request and response DTOs
//! - **v2** (`/api/v2/...`): `ApiRequest`/`ApiResponse` envelopes, search,
//!   bulk operations, actors, likes and per-user statistics
//! - **Probes**: `/ping` and `/health`
//!
//! ## Architecture
//!
//! The server is built on Axum and uses:
//! - PostgreSQL for persistent storage, reached through the repository ports
//!   in `cinevault-core`
//! - `cinevault-config` for layered configuration
//! - `tracing` for structured request and handler logs

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;
pub mod versioning;

pub use app::create_app;
pub use infra::app_state::AppState;
