//! Plain-DTO handlers. Bodies are the bare request/response types and errors
//! render as `{"error": {...}}`.

pub mod movies;
pub mod reviews;
pub mod users;
