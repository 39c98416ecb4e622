use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::{read_error, write_error};
use crate::database::ports::movies::MoviesRepository;
use crate::domain::movies::dedup_ids;
use crate::domain::search::{GenreMatch, LIKE_ESCAPE, contains_pattern};
use crate::domain::{
    MovieDeleteOutcome, MovieDeleteStatus, MovieDetailsResponse, MovieFilter,
    MovieRequest, MovieResponse, ReviewUserResponse, UserResponse,
};
use crate::error::Result;

const MOVIE_SELECT: &str = r#"
SELECT m.id, m.title, m.description, m.release_date, m.genre, m.director,
       COALESCE(AVG(r.rating)::float8, 0) AS average_rating,
       COUNT(r.id) AS review_count
FROM movies m
LEFT JOIN live_reviews r ON r.movie_id = m.id
WHERE NOT m.is_deleted"#;

const TITLE_CONFLICT: &[(&str, &str)] =
    &[("ux_movies_title_live", "A movie with this title already exists")];

/// Builds the search statement for `filter`. Every user-supplied value is
/// bound, never interpolated.
pub(crate) fn movie_search_query(
    filter: &MovieFilter,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::<Postgres>::new(MOVIE_SELECT);

    let push_contains =
        |qb: &mut QueryBuilder<'static, Postgres>, column: &str, term: &str| {
            qb.push(format!("{column} ILIKE "));
            qb.push_bind(contains_pattern(term));
            qb.push(format!(" ESCAPE '{LIKE_ESCAPE}'"));
        };

    if let Some(title) = &filter.title {
        qb.push(" AND ");
        push_contains(&mut qb, "m.title", title);
    }
    if let Some(director) = &filter.director {
        qb.push(" AND ");
        push_contains(&mut qb, "m.director", director);
    }
    if let Some(text) = &filter.text {
        qb.push(" AND (");
        push_contains(&mut qb, "m.title", text);
        qb.push(" OR ");
        push_contains(&mut qb, "m.description", text);
        qb.push(" OR ");
        push_contains(&mut qb, "m.director", text);
        qb.push(")");
    }
    match &filter.genre {
        Some((genre, GenreMatch::CaseInsensitive)) => {
            qb.push(" AND LOWER(m.genre) = LOWER(");
            qb.push_bind(genre.clone());
            qb.push(")");
        }
        Some((genre, GenreMatch::Exact)) => {
            qb.push(" AND m.genre = ");
            qb.push_bind(genre.clone());
        }
        None => {}
    }
    if let Some(date) = filter.release_date {
        qb.push(" AND m.release_date = ");
        qb.push_bind(date);
    }

    qb.push(" GROUP BY m.id");

    if let Some(min_rating) = filter.min_rating {
        qb.push(" HAVING COUNT(r.id) > 0 AND AVG(r.rating)::float8 >= ");
        qb.push_bind(min_rating);
    }

    qb.push(" ORDER BY m.id");
    qb
}

#[derive(sqlx::FromRow)]
struct RecentReviewRow {
    review_id: i32,
    rating: i32,
    comment: Option<String>,
    created_at: DateTime<Utc>,
    user_id: i32,
    username: String,
    email: String,
    user_created_at: DateTime<Utc>,
}

impl From<RecentReviewRow> for ReviewUserResponse {
    fn from(row: RecentReviewRow) -> Self {
        Self {
            review_id: row.review_id,
            rating: row.rating,
            comment: row.comment,
            created_at: row.created_at,
            user: UserResponse {
                id: row.user_id,
                username: row.username,
                email: row.email,
                created_at: row.user_created_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct DeleteCandidate {
    id: i32,
    has_reviews: bool,
}

/// PostgreSQL-backed implementation of the `MoviesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresMoviesRepository {
    pool: PgPool,
}

impl PostgresMoviesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MoviesRepository for PostgresMoviesRepository {
    async fn list_movies(&self) -> Result<Vec<MovieResponse>> {
        let sql = format!("{MOVIE_SELECT} GROUP BY m.id ORDER BY m.id");
        sqlx::query_as::<_, MovieResponse>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to list movies"))
    }

    async fn get_movie(&self, id: i32) -> Result<Option<MovieResponse>> {
        let sql = format!("{MOVIE_SELECT} AND m.id = $1 GROUP BY m.id");
        sqlx::query_as::<_, MovieResponse>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to load movie"))
    }

    async fn get_movie_details(
        &self,
        id: i32,
        review_limit: i64,
    ) -> Result<Option<MovieDetailsResponse>> {
        let Some(movie) = self.get_movie(id).await? else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, RecentReviewRow>(
            r#"
            SELECT r.id AS review_id, r.rating, r.comment, r.created_at,
                   u.id AS user_id, u.username, u.email,
                   u.created_at AS user_created_at
            FROM live_reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.movie_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $2
            "#,
        )
        .bind(id)
        .bind(review_limit)
        .fetch_all(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to load recent reviews"))?;

        Ok(Some(MovieDetailsResponse {
            movie,
            last_reviews: rows.into_iter().map(Into::into).collect(),
        }))
    }

    async fn search_movies(
        &self,
        filter: &MovieFilter,
    ) -> Result<Vec<MovieResponse>> {
        let mut qb = movie_search_query(filter);
        debug!(sql = qb.sql(), "movie search");
        qb.build_query_as::<MovieResponse>()
            .fetch_all(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to search movies"))
    }

    async fn create_movie(&self, movie: &MovieRequest) -> Result<i32> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO movies (title, description, release_date, genre, director)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.release_date)
        .bind(&movie.genre)
        .bind(&movie.director)
        .fetch_one(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to create movie", TITLE_CONFLICT))
    }

    async fn create_movies(&self, movies: &[MovieRequest]) -> Result<Vec<i32>> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| read_error(e, "Failed to start transaction"))?;

        let mut ids = Vec::with_capacity(movies.len());
        for movie in movies {
            let id = sqlx::query_scalar::<_, i32>(
                r#"
                INSERT INTO movies (title, description, release_date, genre, director)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(&movie.title)
            .bind(&movie.description)
            .bind(movie.release_date)
            .bind(&movie.genre)
            .bind(&movie.director)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                write_error(e, "Failed to create movies", TITLE_CONFLICT)
            })?;
            ids.push(id);
        }

        tx.commit()
            .await
            .map_err(|e| read_error(e, "Failed to commit movies"))?;
        Ok(ids)
    }

    async fn update_movie(&self, id: i32, movie: &MovieRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, description = $3, release_date = $4,
                genre = $5, director = $6
            WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(id)
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.release_date)
        .bind(&movie.genre)
        .bind(&movie.director)
        .execute(self.pool())
        .await
        .map_err(|e| write_error(e, "Failed to update movie", TITLE_CONFLICT))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_movie(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE movies SET is_deleted = TRUE WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to delete movie"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_movies(
        &self,
        ids: &[i32],
    ) -> Result<Vec<MovieDeleteOutcome>> {
        let ids = dedup_ids(ids);
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| read_error(e, "Failed to start transaction"))?;

        let candidates = sqlx::query_as::<_, DeleteCandidate>(
            r#"
            SELECT m.id,
                   EXISTS (SELECT 1 FROM live_reviews r WHERE r.movie_id = m.id)
                       AS has_reviews
            FROM movies m
            WHERE m.id = ANY($1) AND NOT m.is_deleted
            FOR UPDATE OF m
            "#,
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| read_error(e, "Failed to load movies for deletion"))?;

        let outcomes: Vec<MovieDeleteOutcome> = ids
            .iter()
            .map(|&id| {
                let status = match candidates.iter().find(|c| c.id == id) {
                    None => MovieDeleteStatus::NotFound,
                    Some(c) if c.has_reviews => MovieDeleteStatus::HasReviews,
                    Some(_) => MovieDeleteStatus::Deleted,
                };
                MovieDeleteOutcome { id, status }
            })
            .collect();

        let deletable: Vec<i32> = outcomes
            .iter()
            .filter(|o| o.status == MovieDeleteStatus::Deleted)
            .map(|o| o.id)
            .collect();

        if !deletable.is_empty() {
            sqlx::query("UPDATE movies SET is_deleted = TRUE WHERE id = ANY($1)")
                .bind(&deletable)
                .execute(&mut *tx)
                .await
                .map_err(|e| read_error(e, "Failed to delete movies"))?;
        }

        tx.commit()
            .await
            .map_err(|e| read_error(e, "Failed to commit movie deletion"))?;
        Ok(outcomes)
    }
}
