use axum::{
    Router,
    handler::Handler,
    routing::{MethodRouter, delete, get, options, post, put},
};
use cinevault_core::api_routes::v2;

use crate::handlers::{
    app_info,
    v2::{actors, likes, movies, reviews, users},
};
use crate::infra::app_state::AppState;

/// Envelope reads carry a body, so they are served on `OPTIONS` and on
/// `POST` for clients that cannot send an `OPTIONS` body.
fn read<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    options(handler.clone()).post(handler)
}

/// Create all v2 API routes
pub fn create_v2_router() -> Router<AppState> {
    Router::new()
        .merge(create_movie_routes())
        .merge(create_actor_routes())
        .merge(create_review_routes())
        .merge(create_user_routes())
        .merge(create_like_routes())
        .route(v2::app_info::ENVIRONMENT, get(app_info::environment))
        .route(v2::app_info::THROW_EXCEPTION, get(app_info::throw_exception))
        .route(v2::app_info::NEW_ENDPOINT, get(app_info::new_endpoint))
}

fn create_movie_routes() -> Router<AppState> {
    Router::new()
        .route(v2::movies::LIST, read(movies::get_movies))
        .route(v2::movies::SEARCH, read(movies::search_movies))
        .route(v2::movies::SEARCH_ALT, read(movies::search_movies_alt))
        .route(v2::movies::DETAILS, read(movies::get_movie_details))
        .route(v2::movies::GET, read(movies::get_movie_by_id))
        .route(v2::movies::CREATE, post(movies::create_movie))
        .route(v2::movies::CREATE_MANY, post(movies::create_movies))
        .route(v2::movies::UPDATE, put(movies::update_movie))
        .route(v2::movies::DELETE, delete(movies::delete_movie))
        .route(v2::movies::DELETE_MANY, delete(movies::delete_movies))
}

fn create_actor_routes() -> Router<AppState> {
    Router::new()
        .route(v2::actors::LIST, read(actors::get_actors))
        .route(v2::actors::GET, read(actors::get_actor_by_id))
        .route(v2::actors::CREATE, post(actors::create_actor))
        .route(v2::actors::UPDATE, put(actors::update_actor))
        .route(v2::actors::DELETE, delete(actors::delete_actor))
}

fn create_review_routes() -> Router<AppState> {
    Router::new()
        .route(v2::reviews::LIST, read(reviews::get_reviews))
        .route(v2::reviews::GET, read(reviews::get_review_by_id))
        .route(v2::reviews::CREATE, post(reviews::create_review))
        .route(v2::reviews::UPDATE, put(reviews::update_review))
        .route(v2::reviews::DELETE, delete(reviews::delete_review))
}

fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route(v2::users::LIST, read(users::get_users))
        .route(v2::users::GET, read(users::get_user_by_id))
        .route(v2::users::SEARCH, read(users::search_users))
        .route(v2::users::STATS, read(users::get_user_stats))
        .route(v2::users::CREATE, post(users::create_user))
        .route(v2::users::UPDATE, put(users::update_user))
        .route(v2::users::DELETE, delete(users::delete_user))
}

fn create_like_routes() -> Router<AppState> {
    Router::new()
        .route(v2::likes::LIST, read(likes::get_likes))
        .route(v2::likes::GET, read(likes::get_like_by_id))
        .route(v2::likes::CREATE, post(likes::create_like))
        .route(v2::likes::DELETE, delete(likes::delete_like))
}
