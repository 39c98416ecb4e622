//! # CineVault Core
//!
//! Domain types, validation and persistence for the CineVault movie-review
//! catalog.
//!
//! ## Overview
//!
//! - **Catalog entities**: movies, actors, reviews, users and likes, each with
//!   request/response DTOs and field validation
//! - **API envelopes**: the request/response wrappers used by the v2 API
//! - **Route table**: every versioned path the server exposes
//! - **Repository ports**: async traits the HTTP layer depends on, with
//!   PostgreSQL adapters behind them
//! - **Password hashing**: Argon2id with a server-side pepper
//!
//! ## Feature Flags
//!
//! - `database` (default): PostgreSQL adapters, the connection pool and the
//!   embedded [`MIGRATOR`]
//! - `mocks`: `mockall` doubles for every repository port
//!
//! ## Soft deletion
//!
//! Nothing is ever physically removed. Every table carries `is_deleted`, every
//! read filters it, and uniqueness is enforced only among live rows so that a
//! deleted title or username can be reused.

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Versioned route constants shared by the server and its tests
pub mod api_routes;
/// Request and response envelopes
pub mod api_types;
pub mod application;
pub mod crypto;
/// Repository ports and their PostgreSQL implementations
pub mod database;
pub mod domain;
pub mod error;

pub use api_types::{ApiRequest, ApiRequestMeta, ApiResponse, Page};
pub use error::{CatalogError, Result};

#[cfg(feature = "database")]
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
