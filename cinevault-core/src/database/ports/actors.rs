use async_trait::async_trait;

use crate::domain::{ActorRequest, ActorResponse};
use crate::error::Result;

#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait ActorsRepository: Send + Sync {
    async fn list_actors(&self) -> Result<Vec<ActorResponse>>;
    async fn get_actor(&self, id: i32) -> Result<Option<ActorResponse>>;
    /// Fails with `NotFound` when a listed movie is missing or deleted.
    async fn create_actor(&self, actor: &ActorRequest) -> Result<i32>;
    async fn update_actor(&self, id: i32, actor: &ActorRequest) -> Result<bool>;
    async fn delete_actor(&self, id: i32) -> Result<bool>;
}
