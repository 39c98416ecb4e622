use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::{read_error, write_error};
use crate::api_types::Page;
use crate::database::ports::users::UsersRepository;
use crate::domain::search::{LIKE_ESCAPE, contains_pattern};
use crate::domain::users::UNKNOWN_GENRE;
use crate::domain::{UserQuery, UserRecord, UserResponse, UserStatsResponse};
use crate::error::Result;

const USER_CONFLICTS: &[(&str, &str)] = &[
    ("ux_users_username_live", "Username already exists"),
    ("ux_users_email_live", "Email already exists"),
];

/// Appends the shared `WHERE` clause of a user search.
fn push_user_filters(qb: &mut QueryBuilder<'static, Postgres>, query: &UserQuery) {
    qb.push(" WHERE NOT is_deleted");

    if let Some(term) = &query.search_term {
        let pattern = contains_pattern(term);
        qb.push(" AND (username ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(format!(" ESCAPE '{LIKE_ESCAPE}' OR email ILIKE "));
        qb.push_bind(pattern);
        qb.push(format!(" ESCAPE '{LIKE_ESCAPE}')"));
    }
    if let Some(after) = query.created_after {
        qb.push(" AND created_at >= ");
        qb.push_bind(after);
    }
    if let Some(before) = query.created_before {
        qb.push(" AND created_at <= ");
        qb.push_bind(before);
    }
}

pub(crate) fn user_count_query(query: &UserQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users");
    push_user_filters(&mut qb, query);
    qb
}

pub(crate) fn user_page_query(query: &UserQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb =
        QueryBuilder::new("SELECT id, username, email, created_at FROM users");
    push_user_filters(&mut qb, query);
    // Sort column and direction come from closed enums, never from input.
    qb.push(format!(
        " ORDER BY {} {}, id {}",
        query.sort_by.column(),
        query.sort_order.keyword(),
        query.sort_order.keyword()
    ));
    qb.push(" LIMIT ");
    qb.push_bind(query.page_size);
    qb.push(" OFFSET ");
    qb.push_bind(query.offset());
    qb
}

#[derive(sqlx::FromRow)]
struct ReviewTotals {
    total_reviews: i64,
    average_rating: f64,
    last_activity: Option<DateTime<Utc>>,
}

/// PostgreSQL-backed implementation of the `UsersRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresUsersRepository {
    pool: PgPool,
}

impl PostgresUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UsersRepository for PostgresUsersRepository {
    async fn list_users(&self) -> Result<Vec<UserResponse>> {
        sqlx::query_as::<_, UserResponse>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE NOT is_deleted
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to list users"))
    }

    async fn get_user(&self, id: i32) -> Result<Option<UserResponse>> {
        sqlx::query_as::<_, UserResponse>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to load user"))
    }

    async fn create_user(&self, user: &UserRecord) -> Result<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to create user", USER_CONFLICTS))?;

        info!(user_id = id, username = %user.username, "user created");
        Ok(id)
    }

    async fn update_user(&self, id: i32, user: &UserRecord) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4
            WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to update user", USER_CONFLICTS))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = TRUE WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to delete user"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_users(&self, query: &UserQuery) -> Result<Page<UserResponse>> {
        let mut count = user_count_query(query);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to count users"))?;

        let mut page = user_page_query(query);
        let items = page
            .build_query_as::<UserResponse>()
            .fetch_all(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to search users"))?;

        Ok(Page::new(items, total, query.page_number, query.page_size))
    }

    async fn user_stats(&self, id: i32) -> Result<Option<UserStatsResponse>> {
        if self.get_user(id).await?.is_none() {
            return Ok(None);
        }

        let totals = sqlx::query_as::<_, ReviewTotals>(
            r#"
            SELECT COUNT(*) AS total_reviews,
                   COALESCE(AVG(rating)::float8, 0) AS average_rating,
                   MAX(created_at) AS last_activity
            FROM live_reviews
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to aggregate reviews"))?;

        let genres: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(NULLIF(m.genre, ''), $2) AS genre, COUNT(*) AS reviews
            FROM live_reviews r
            JOIN movies m ON m.id = r.movie_id
            WHERE r.user_id = $1
            GROUP BY 1
            "#,
        )
        .bind(id)
        .bind(UNKNOWN_GENRE)
        .fetch_all(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to aggregate genres"))?;

        Ok(Some(UserStatsResponse {
            total_reviews: totals.total_reviews,
            average_rating: totals.average_rating,
            genre_stats: genres.into_iter().collect::<BTreeMap<_, _>>(),
            last_activity: totals.last_activity,
        }))
    }
}
