//! Field-level validation for inbound catalog payloads.
//!
//! Length limits mirror the column sizes declared in the schema so that a
//! request which passes validation never trips a `varchar` overflow.

use thiserror::Error;

pub const TITLE_MAX: usize = 150;
pub const DESCRIPTION_MAX: usize = 1000;
pub const GENRE_MAX: usize = 50;
pub const DIRECTOR_MAX: usize = 100;
pub const FULL_NAME_MAX: usize = 100;
pub const BIOGRAPHY_MAX: usize = 2000;
pub const USERNAME_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const PASSWORD_MAX: usize = 100;
pub const COMMENT_MAX: usize = 1000;

pub const RATING_MIN: i32 = 0;
pub const RATING_MAX: i32 = 10;

pub const PAGE_SIZE_MAX: i64 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("Rating must be between 0 and 10, got {0}")]
    RatingOutOfRange(i32),

    #[error("Unsupported sort field '{0}' (expected username, email or createdAt)")]
    UnknownSortField(String),

    #[error("Unsupported sort order '{0}' (expected asc or desc)")]
    UnknownSortOrder(String),

    #[error("pageNumber must be at least 1")]
    InvalidPageNumber,

    #[error("pageSize must be between 1 and {PAGE_SIZE_MAX}")]
    InvalidPageSize,

    #[error("pageNumber {0} is out of range")]
    PageOutOfRange(i64),

    #[error("At least one {0} must be supplied")]
    EmptyBatch(&'static str),
}

/// Implemented by request payloads that carry user input worth checking
/// before it reaches the database.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn required(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    max_len(field, Some(value), max)
}

pub(crate) fn max_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => {
            Err(ValidationError::TooLong { field, max })
        }
        _ => Ok(()),
    }
}

pub(crate) fn rating(value: i32) -> Result<(), ValidationError> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RatingOutOfRange(value))
    }
}
