use async_trait::async_trait;
use sqlx::PgPool;

use super::{read_error, write_error};
use crate::database::ports::reviews::ReviewsRepository;
use crate::domain::{ReviewRequest, ReviewResponse};
use crate::error::{CatalogError, Result};

const REVIEW_SELECT: &str = r#"
SELECT r.id, r.movie_id, m.title AS movie_title, r.user_id, u.username,
       r.rating, r.comment, r.created_at
FROM live_reviews r
JOIN movies m ON m.id = r.movie_id
JOIN users u ON u.id = r.user_id"#;

const REVIEW_CONFLICT: &[(&str, &str)] = &[(
    "ux_reviews_user_movie_live",
    "This user has already reviewed this movie",
)];

/// PostgreSQL-backed implementation of the `ReviewsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresReviewsRepository {
    pool: PgPool,
}

impl PostgresReviewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn missing_reference(review: &ReviewRequest) -> CatalogError {
        CatalogError::NotFound(format!(
            "Movie with id {} or user with id {} not found",
            review.movie_id, review.user_id
        ))
    }
}

#[async_trait]
impl ReviewsRepository for PostgresReviewsRepository {
    async fn list_reviews(&self) -> Result<Vec<ReviewResponse>> {
        let sql = format!("{REVIEW_SELECT} ORDER BY r.id");
        sqlx::query_as::<_, ReviewResponse>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to list reviews"))
    }

    async fn get_review(&self, id: i32) -> Result<Option<ReviewResponse>> {
        let sql = format!("{REVIEW_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, ReviewResponse>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to load review"))
    }

    async fn create_review(&self, review: &ReviewRequest) -> Result<i32> {
        // The existence checks ride along with the insert so a concurrent
        // soft-delete cannot slip between check and write.
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO reviews (movie_id, user_id, rating, comment)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM movies WHERE id = $1 AND NOT is_deleted)
              AND EXISTS (SELECT 1 FROM users WHERE id = $2 AND NOT is_deleted)
            RETURNING id
            "#,
        )
        .bind(review.movie_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to create review", REVIEW_CONFLICT))?;

        id.ok_or_else(|| Self::missing_reference(review))
    }

    async fn update_review(
        &self,
        id: i32,
        review: &ReviewRequest,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM live_reviews WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to load review"))?;
        if !exists {
            return Ok(false);
        }

        let result = sqlx::query(
            r#"
            UPDATE reviews
            SET movie_id = $2, user_id = $3, rating = $4, comment = $5
            WHERE id = $1 AND NOT is_deleted
              AND EXISTS (SELECT 1 FROM movies WHERE id = $2 AND NOT is_deleted)
              AND EXISTS (SELECT 1 FROM users WHERE id = $3 AND NOT is_deleted)
            "#,
        )
        .bind(id)
        .bind(review.movie_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.comment)
        .execute(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to update review", REVIEW_CONFLICT))?;

        if result.rows_affected() == 0 {
            return Err(Self::missing_reference(review));
        }
        Ok(true)
    }

    async fn delete_review(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET is_deleted = TRUE
            WHERE id = $1 AND id IN (SELECT id FROM live_reviews)
            "#,
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to delete review"))?;

        Ok(result.rows_affected() > 0)
    }
}
