use axum::{Json, extract::State};
use cinevault_core::{
    ApiRequest, ApiRequestMeta, ApiResponse,
    domain::{
        MovieDeleteStatus, MovieDetailsResponse, MovieFilter, MovieRequest,
        MovieResponse, SearchMoviesAltRequest, SearchMoviesRequest, Validate,
        ValidationError, movies::DETAILS_REVIEW_LIMIT,
    },
};
use tracing::{info, warn};

use super::{Enveloped, not_found, vanished};
use crate::infra::{
    app_state::AppState,
    extract::{Envelope, EnvelopePath},
};

const MOVIE_NOT_FOUND: &str = "Movie is not found";

pub async fn get_movies(
    State(state): State<AppState>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<Vec<MovieResponse>> {
    info!(request_id = %meta.request_id, caller = %meta.username, "GetMovies (v2) called");
    let movies = state.unit_of_work().movies.list_movies().await?;
    info!(
        request_id = %meta.request_id,
        movie_count = movies.len(),
        "GetMovies (v2) completed"
    );
    Ok(Json(ApiResponse::ok("Movies are received", movies)))
}

async fn search(
    state: &AppState,
    meta: &ApiRequestMeta,
    action: &'static str,
    filter: MovieFilter,
) -> Enveloped<Vec<MovieResponse>> {
    for (name, value) in filter.applied() {
        info!(request_id = %meta.request_id, filter = name, %value, "{action}: filtering movies");
    }

    let movies = state.unit_of_work().movies.search_movies(&filter).await?;
    info!(
        request_id = %meta.request_id,
        movie_count = movies.len(),
        "{action} completed"
    );
    Ok(Json(ApiResponse::ok("Movies are received", movies)))
}

pub async fn search_movies(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<SearchMoviesRequest>>,
) -> Enveloped<Vec<MovieResponse>> {
    info!(request_id = %request.meta.request_id, criteria = ?request.data, "SearchMovies (v2) called");
    search(&state, &request.meta, "SearchMovies", request.data.into()).await
}

pub async fn search_movies_alt(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<SearchMoviesAltRequest>>,
) -> Enveloped<Vec<MovieResponse>> {
    info!(request_id = %request.meta.request_id, criteria = ?request.data, "SearchMoviesAlt (v2) called");
    search(&state, &request.meta, "SearchMoviesAlt", request.data.into()).await
}

pub async fn get_movie_details(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<MovieDetailsResponse> {
    info!(request_id = %meta.request_id, movie_id = id, "GetMovieDetails (v2) called");
    let Some(details) = state
        .unit_of_work()
        .movies
        .get_movie_details(id, DETAILS_REVIEW_LIMIT)
        .await?
    else {
        warn!(request_id = %meta.request_id, movie_id = id, "GetMovieDetails (v2): movie not found");
        return Err(not_found(MOVIE_NOT_FOUND));
    };

    Ok(Json(ApiResponse::ok("Movie details are received", details)))
}

pub async fn get_movie_by_id(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<MovieResponse> {
    info!(request_id = %meta.request_id, movie_id = id, "GetMovieById (v2) called");
    let Some(movie) = state.unit_of_work().movies.get_movie(id).await? else {
        warn!(request_id = %meta.request_id, movie_id = id, "GetMovieById (v2): movie not found");
        return Err(not_found(MOVIE_NOT_FOUND));
    };

    info!(request_id = %meta.request_id, movie_id = id, "GetMovieById (v2) completed");
    Ok(Json(ApiResponse::ok("OK", movie)))
}

pub async fn create_movie(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<MovieRequest>>,
) -> Enveloped<i32> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, title = %data.title, "CreateMovie (v2) called");
    data.validate()?;

    let id = state.unit_of_work().movies.create_movie(&data).await?;
    info!(request_id = %meta.request_id, movie_id = id, "CreateMovie (v2) completed");
    Ok(Json(ApiResponse::ok("Movie is created", id)))
}

pub async fn create_movies(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<Vec<MovieRequest>>>,
) -> Enveloped<Vec<i32>> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, movie_count = data.len(), "CreateMovies (v2) called");
    if data.is_empty() {
        return Err(ValidationError::EmptyBatch("movie").into());
    }
    for movie in &data {
        movie.validate()?;
    }

    let ids = state.unit_of_work().movies.create_movies(&data).await?;
    info!(request_id = %meta.request_id, movie_ids = ?ids, "CreateMovies (v2) completed");
    Ok(Json(ApiResponse::ok("Movies are created", ids)))
}

pub async fn update_movie(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(request): Envelope<ApiRequest<MovieRequest>>,
) -> Enveloped<MovieResponse> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, movie_id = id, "UpdateMovie (v2) called");
    data.validate()?;

    let movies = &state.unit_of_work().movies;
    if !movies.update_movie(id, &data).await? {
        warn!(request_id = %meta.request_id, movie_id = id, "UpdateMovie (v2): movie not found");
        return Err(not_found(MOVIE_NOT_FOUND));
    }
    let movie = movies
        .get_movie(id)
        .await?
        .ok_or_else(|| vanished("Movie", id))?;

    info!(request_id = %meta.request_id, movie_id = id, "UpdateMovie (v2) completed");
    Ok(Json(ApiResponse::ok("Movie is updated", movie)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    EnvelopePath(id): EnvelopePath<i32>,
    Envelope(meta): Envelope<ApiRequestMeta>,
) -> Enveloped<()> {
    info!(request_id = %meta.request_id, movie_id = id, "DeleteMovie (v2) called");
    if !state.unit_of_work().movies.delete_movie(id).await? {
        warn!(request_id = %meta.request_id, movie_id = id, "DeleteMovie (v2): movie not found");
        return Err(not_found(MOVIE_NOT_FOUND));
    }

    info!(request_id = %meta.request_id, movie_id = id, "DeleteMovie (v2) completed");
    Ok(Json(ApiResponse::message(200, "Movie is deleted")))
}

/// Soft-deletes every listed movie that has no live reviews and reports
/// one line per distinct id.
pub async fn delete_movies(
    State(state): State<AppState>,
    Envelope(request): Envelope<ApiRequest<Vec<i32>>>,
) -> Enveloped<Vec<String>> {
    let ApiRequest { meta, data } = request;
    info!(request_id = %meta.request_id, movie_ids = ?data, "DeleteMovies (v2) called");
    if data.is_empty() {
        return Err(ValidationError::EmptyBatch("movie id").into());
    }

    let outcomes = state.unit_of_work().movies.delete_movies(&data).await?;

    let mut deleted = 0usize;
    let messages = outcomes
        .iter()
        .map(|outcome| {
            let message = outcome.message();
            match outcome.status {
                MovieDeleteStatus::Deleted => {
                    deleted += 1;
                    info!(request_id = %meta.request_id, "DeleteMovies (v2): {message}");
                }
                MovieDeleteStatus::NotFound | MovieDeleteStatus::HasReviews => {
                    warn!(request_id = %meta.request_id, "DeleteMovies (v2): {message}");
                }
            }
            message
        })
        .collect::<Vec<_>>();

    info!(request_id = %meta.request_id, deleted, "DeleteMovies (v2) completed");
    Ok(Json(ApiResponse::ok(
        format!("Movies are deleted. Check data. Actually deleted: {deleted}."),
        messages,
    )))
}
