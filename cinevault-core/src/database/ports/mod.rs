//! Repository ports (interfaces) grouped by catalog entity.
//!
//! Handlers only ever talk to these traits; the PostgreSQL adapters live under
//! `database::infrastructure::postgres`.

pub mod actors;
pub mod likes;
pub mod movies;
pub mod reviews;
pub mod users;
