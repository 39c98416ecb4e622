use async_trait::async_trait;

use crate::api_types::Page;
use crate::domain::{UserQuery, UserRecord, UserResponse, UserStatsResponse};
use crate::error::Result;

// Password hashes go in through `UserRecord` and never come back out.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserResponse>>;
    async fn get_user(&self, id: i32) -> Result<Option<UserResponse>>;
    /// `Conflict` when the username or email belongs to a live user.
    async fn create_user(&self, user: &UserRecord) -> Result<i32>;
    async fn update_user(&self, id: i32, user: &UserRecord) -> Result<bool>;
    async fn delete_user(&self, id: i32) -> Result<bool>;
    async fn search_users(&self, query: &UserQuery) -> Result<Page<UserResponse>>;
    /// `None` when the user does not exist.
    async fn user_stats(&self, id: i32) -> Result<Option<UserStatsResponse>>;
}
