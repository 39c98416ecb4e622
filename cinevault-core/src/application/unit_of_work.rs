use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::ports::{
    actors::ActorsRepository, likes::LikesRepository,
    movies::MoviesRepository, reviews::ReviewsRepository,
    users::UsersRepository,
};
#[cfg(feature = "database")]
use crate::database::{
    infrastructure::postgres::{
        PostgresActorsRepository, PostgresLikesRepository,
        PostgresMoviesRepository, PostgresReviewsRepository,
        PostgresUsersRepository,
    },
    postgres::PostgresDatabase,
};

/// Aggregates the repository ports the request handlers depend on.
///
/// Handlers never see a concrete adapter, so tests can swap any port for a
/// double through [`AppUnitOfWorkBuilder`].
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub movies: Arc<dyn MoviesRepository>,
    pub actors: Arc<dyn ActorsRepository>,
    pub reviews: Arc<dyn ReviewsRepository>,
    pub users: Arc<dyn UsersRepository>,
    pub likes: Arc<dyn LikesRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("movies", &type_name_of_val(self.movies.as_ref()))
            .field("actors", &type_name_of_val(self.actors.as_ref()))
            .field("reviews", &type_name_of_val(self.reviews.as_ref()))
            .field("users", &type_name_of_val(self.users.as_ref()))
            .field("likes", &type_name_of_val(self.likes.as_ref()))
            .finish()
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    movies: Option<Arc<dyn MoviesRepository>>,
    actors: Option<Arc<dyn ActorsRepository>>,
    reviews: Option<Arc<dyn ReviewsRepository>>,
    users: Option<Arc<dyn UsersRepository>>,
    likes: Option<Arc<dyn LikesRepository>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("movies", &self.movies.is_some())
            .field("actors", &self.actors.is_some())
            .field("reviews", &self.reviews.is_some())
            .field("users", &self.users.is_some())
            .field("likes", &self.likes.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(mut self, repo: Arc<dyn MoviesRepository>) -> Self {
        self.movies = Some(repo);
        self
    }
    pub fn with_actors(mut self, repo: Arc<dyn ActorsRepository>) -> Self {
        self.actors = Some(repo);
        self
    }
    pub fn with_reviews(mut self, repo: Arc<dyn ReviewsRepository>) -> Self {
        self.reviews = Some(repo);
        self
    }
    pub fn with_users(mut self, repo: Arc<dyn UsersRepository>) -> Self {
        self.users = Some(repo);
        self
    }
    pub fn with_likes(mut self, repo: Arc<dyn LikesRepository>) -> Self {
        self.likes = Some(repo);
        self
    }

    /// Build a validated AppUnitOfWork. Returns a string error naming the
    /// first missing repository.
    pub fn build(self) -> Result<AppUnitOfWork, String> {
        Ok(AppUnitOfWork {
            movies: self
                .movies
                .ok_or_else(|| "missing MoviesRepository".to_string())?,
            actors: self
                .actors
                .ok_or_else(|| "missing ActorsRepository".to_string())?,
            reviews: self
                .reviews
                .ok_or_else(|| "missing ReviewsRepository".to_string())?,
            users: self
                .users
                .ok_or_else(|| "missing UsersRepository".to_string())?,
            likes: self
                .likes
                .ok_or_else(|| "missing LikesRepository".to_string())?,
        })
    }
}

#[cfg(feature = "database")]
impl AppUnitOfWork {
    /// Compose every Postgres-backed repository into a unit of work.
    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        let pool = db.pool().clone();
        Self {
            movies: Arc::new(PostgresMoviesRepository::new(pool.clone())),
            actors: Arc::new(PostgresActorsRepository::new(pool.clone())),
            reviews: Arc::new(PostgresReviewsRepository::new(pool.clone())),
            users: Arc::new(PostgresUsersRepository::new(pool.clone())),
            likes: Arc::new(PostgresLikesRepository::new(pool)),
        }
    }
}
