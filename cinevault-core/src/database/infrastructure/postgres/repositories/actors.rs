use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::read_error;
use crate::database::ports::actors::ActorsRepository;
use crate::domain::movies::dedup_ids;
use crate::domain::{ActorRequest, ActorResponse};
use crate::error::{CatalogError, Result};

// Links to deleted movies are kept but not reported.
const ACTOR_SELECT: &str = r#"
SELECT a.id, a.full_name, a.birth_date, a.biography,
       COALESCE(
           ARRAY_AGG(m.id ORDER BY m.id) FILTER (WHERE m.id IS NOT NULL),
           '{}'
       ) AS movie_ids
FROM actors a
LEFT JOIN actor_movies am ON am.actor_id = a.id
LEFT JOIN movies m ON m.id = am.movie_id AND NOT m.is_deleted
WHERE NOT a.is_deleted"#;

/// PostgreSQL-backed implementation of the `ActorsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresActorsRepository {
    pool: PgPool,
}

impl PostgresActorsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Replaces the actor's filmography. Every movie must be live.
    async fn link_movies(
        tx: &mut Transaction<'_, Postgres>,
        actor_id: i32,
        movie_ids: &[i32],
    ) -> Result<()> {
        let movie_ids = dedup_ids(movie_ids);

        if !movie_ids.is_empty() {
            let live: Vec<i32> = sqlx::query_scalar(
                "SELECT id FROM movies WHERE id = ANY($1) AND NOT is_deleted",
            )
            .bind(&movie_ids)
            .fetch_all(&mut **tx)
            .await
            .map_err(|e| read_error(e, "Failed to check movies"))?;

            if let Some(missing) =
                movie_ids.iter().find(|id| !live.contains(id))
            {
                return Err(CatalogError::not_found("Movie", *missing));
            }
        }

        sqlx::query("DELETE FROM actor_movies WHERE actor_id = $1")
            .bind(actor_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| read_error(e, "Failed to clear filmography"))?;

        if !movie_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO actor_movies (actor_id, movie_id)
                SELECT $1, UNNEST($2::int4[])
                "#,
            )
            .bind(actor_id)
            .bind(&movie_ids)
            .execute(&mut **tx)
            .await
            .map_err(|e| read_error(e, "Failed to link movies"))?;
        }

        Ok(())
    }
}

#[async_trait]
impl ActorsRepository for PostgresActorsRepository {
    async fn list_actors(&self) -> Result<Vec<ActorResponse>> {
        let sql = format!("{ACTOR_SELECT} GROUP BY a.id ORDER BY a.id");
        sqlx::query_as::<_, ActorResponse>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to list actors"))
    }

    async fn get_actor(&self, id: i32) -> Result<Option<ActorResponse>> {
        let sql = format!("{ACTOR_SELECT} AND a.id = $1 GROUP BY a.id");
        sqlx::query_as::<_, ActorResponse>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| read_error(e, "Failed to load actor"))
    }

    async fn create_actor(&self, actor: &ActorRequest) -> Result<i32> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| read_error(e, "Failed to start transaction"))?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO actors (full_name, birth_date, biography)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&actor.full_name)
        .bind(actor.birth_date)
        .bind(&actor.biography)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| read_error(e, "Failed to create actor"))?;

        Self::link_movies(&mut tx, id, &actor.movie_ids).await?;

        tx.commit()
            .await
            .map_err(|e| read_error(e, "Failed to commit actor"))?;
        Ok(id)
    }

    async fn update_actor(&self, id: i32, actor: &ActorRequest) -> Result<bool> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| read_error(e, "Failed to start transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE actors
            SET full_name = $2, birth_date = $3, biography = $4
            WHERE id = $1 AND NOT is_deleted
            "#,
        )
        .bind(id)
        .bind(&actor.full_name)
        .bind(actor.birth_date)
        .bind(&actor.biography)
        .execute(&mut *tx)
        .await
        .map_err(|e| read_error(e, "Failed to update actor"))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::link_movies(&mut tx, id, &actor.movie_ids).await?;

        tx.commit()
            .await
            .map_err(|e| read_error(e, "Failed to commit actor"))?;
        Ok(true)
    }

    async fn delete_actor(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE actors SET is_deleted = TRUE WHERE id = $1 AND NOT is_deleted",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| read_error(e, "Failed to delete actor"))?;

        Ok(result.rows_affected() > 0)
    }
}
