use async_trait::async_trait;
use sqlx::PgPool;

use super::{read_error, write_error};
use crate::database::ports::likes::LikesRepository;
use crate::domain::{LikeRequest, LikeResponse};
use crate::error::{CatalogError, Result};

// A like is visible only while its review is.
const LIKE_SELECT: &str = r#"
SELECT l.id, l.review_id, l.user_id
FROM likes l
JOIN live_reviews r ON r.id = l.review_id
JOIN users u ON u.id = l.user_id AND NOT u.is_deleted
WHERE NOT l.is_deleted"#;

const LIKE_CONFLICT: &[(&str, &str)] = &[(
    "ux_likes_user_review_live",
    "This user has already liked this review",
)];

/// PostgreSQL-backed implementation of the `LikesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresLikesRepository {
    pool: PgPool,
}

impl PostgresLikesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl LikesRepository for PostgresLikesRepository {
    async fn list_likes(&self) -> Result<Vec<LikeResponse>> {
        let sql = format!("{LIKE_SELECT} ORDER BY l.id");
        sqlx::query_as::<_, LikeResponse>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to list likes"))
    }

    async fn get_like(&self, id: i32) -> Result<Option<LikeResponse>> {
        let sql = format!("{LIKE_SELECT} AND l.id = $1");
        sqlx::query_as::<_, LikeResponse>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to load like"))
    }

    async fn create_like(&self, like: &LikeRequest) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO likes (review_id, user_id)
            SELECT $1, $2
            WHERE EXISTS (SELECT 1 FROM live_reviews WHERE id = $1)
              AND EXISTS (SELECT 1 FROM users WHERE id = $2 AND NOT is_deleted)
            RETURNING id
            "#,
        )
        .bind(like.review_id)
        .bind(like.user_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to create like", LIKE_CONFLICT))?;

        id.ok_or_else(|| {
            CatalogError::NotFound(format!(
                "Review with id {} or user with id {} not found",
                like.review_id, like.user_id
            ))
        })
    }

    async fn delete_like(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE likes SET is_deleted = TRUE WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to delete like"))?;

        Ok(result.rows_affected() > 0)
    }
}
