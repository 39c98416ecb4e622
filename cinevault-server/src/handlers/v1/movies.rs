use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use cinevault_core::domain::{MovieRequest, MovieResponse, Validate};
use tracing::{error, info};

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    extract::{JsonBody, PathParam},
};

pub async fn get_movies(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    info!("GetMovies called");
    let movies = state.unit_of_work().movies.list_movies().await?;
    info!(movie_count = movies.len(), "GetMovies completed");
    Ok(Json(movies))
}

pub async fn get_movie_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<Json<MovieResponse>> {
    info!(movie_id = id, "GetMovieById called");
    match state.unit_of_work().movies.get_movie(id).await? {
        Some(movie) => {
            info!(
                movie_id = id,
                review_count = movie.review_count,
                "GetMovieById completed"
            );
            Ok(Json(movie))
        }
        None => {
            error!(movie_id = id, "movie not found");
            Err(AppError::not_found(format!("Movie with id {id} not found")))
        }
    }
}

pub async fn create_movie(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<MovieRequest>,
) -> AppResult<StatusCode> {
    info!(title = %request.title, "CreateMovie called");
    request.validate()?;
    let id = state.unit_of_work().movies.create_movie(&request).await?;
    info!(movie_id = id, title = %request.title, "movie created");
    Ok(StatusCode::CREATED)
}

pub async fn update_movie(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(request): JsonBody<MovieRequest>,
) -> AppResult<StatusCode> {
    info!(movie_id = id, "UpdateMovie called");
    request.validate()?;
    if !state.unit_of_work().movies.update_movie(id, &request).await? {
        error!(movie_id = id, "movie not found for update");
        return Err(AppError::not_found(format!("Movie with id {id} not found")));
    }
    info!(movie_id = id, title = %request.title, "movie updated");
    Ok(StatusCode::OK)
}

pub async fn delete_movie(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> AppResult<StatusCode> {
    info!(movie_id = id, "DeleteMovie called");
    if !state.unit_of_work().movies.delete_movie(id).await? {
        error!(movie_id = id, "movie not found for deletion");
        return Err(AppError::not_found(format!("Movie with id {id} not found")));
    }
    info!(movie_id = id, "movie deleted");
    Ok(StatusCode::OK)
}
