use async_trait::async_trait;

use crate::domain::{
    MovieDeleteOutcome, MovieDetailsResponse, MovieFilter, MovieRequest,
    MovieResponse,
};
use crate::error::Result;

/// Movie catalog persistence. Every read excludes soft-deleted rows, and the
/// rating aggregates only count live reviews.
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait MoviesRepository: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<MovieResponse>>;
    async fn get_movie(&self, id: i32) -> Result<Option<MovieResponse>>;
    /// The movie plus its `review_limit` newest live reviews.
    async fn get_movie_details(
        &self,
        id: i32,
        review_limit: i64,
    ) -> Result<Option<MovieDetailsResponse>>;
    async fn search_movies(
        &self,
        filter: &MovieFilter,
    ) -> Result<Vec<MovieResponse>>;

    /// Fails with `Conflict` when a live movie already has the title.
    async fn create_movie(&self, movie: &MovieRequest) -> Result<i32>;
    /// All-or-nothing; ids are returned in input order.
    async fn create_movies(&self, movies: &[MovieRequest]) -> Result<Vec<i32>>;
    /// `false` when no live movie has the id.
    async fn update_movie(&self, id: i32, movie: &MovieRequest) -> Result<bool>;
    async fn delete_movie(&self, id: i32) -> Result<bool>;
    /// Soft-deletes every listed movie without live reviews; one outcome per
    /// distinct id.
    async fn delete_movies(&self, ids: &[i32]) -> Result<Vec<MovieDeleteOutcome>>;
}
