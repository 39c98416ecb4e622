use async_trait::async_trait;

use crate::domain::{LikeRequest, LikeResponse};
use crate::error::Result;

#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait LikesRepository: Send + Sync {
    async fn list_likes(&self) -> Result<Vec<LikeResponse>>;
    async fn get_like(&self, id: i32) -> Result<Option<LikeResponse>>;
    /// `NotFound` when the review or user is missing; `Conflict` when the
    /// user already liked the review.
    async fn create_like(&self, like: &LikeRequest) -> Result<i32>;
    async fn delete_like(&self, id: i32) -> Result<bool>;
}
