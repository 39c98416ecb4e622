use thiserror::Error;

use crate::domain::validation::ValidationError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// `"{entity} with id {id} not found"`
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CatalogError::not_found("Movie", 42);
        assert_eq!(err.to_string(), "Movie with id 42 not found");
    }

    #[test]
    fn validation_errors_are_transparent() {
        let err: CatalogError = ValidationError::RatingOutOfRange(11).into();
        assert_eq!(err.to_string(), "Rating must be between 0 and 10, got 11");
    }
}
