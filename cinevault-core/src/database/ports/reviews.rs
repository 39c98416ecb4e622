use async_trait::async_trait;

use crate::domain::{ReviewRequest, ReviewResponse};
use crate::error::Result;

/// Reviews are only visible while the review, its movie and its author are
/// all live.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ReviewsRepository: Send + Sync {
    async fn list_reviews(&self) -> Result<Vec<ReviewResponse>>;
    async fn get_review(&self, id: i32) -> Result<Option<ReviewResponse>>;
    /// `NotFound` when the movie or user is missing; `Conflict` when the user
    /// already reviewed the movie.
    async fn create_review(&self, review: &ReviewRequest) -> Result<i32>;
    async fn update_review(
        &self,
        id: i32,
        review: &ReviewRequest,
    ) -> Result<bool>;
    async fn delete_review(&self, id: i32) -> Result<bool>;
}
