use axum::{
    Router,
    routing::{delete, get, post, put},
};
use cinevault_core::api_routes::v1;

use crate::handlers::{
    app_info,
    v1::{movies, reviews, users},
};
use crate::infra::app_state::AppState;

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .merge(create_movie_routes())
        .merge(create_review_routes())
        .merge(create_user_routes())
        .route(v1::app_info::ENVIRONMENT, get(app_info::environment))
        .route(v1::app_info::THROW_EXCEPTION, get(app_info::throw_exception))
        .route(v1::app_info::OLD_ENDPOINT, get(app_info::old_endpoint))
}

fn create_movie_routes() -> Router<AppState> {
    Router::new()
        .route(v1::movies::LIST, get(movies::get_movies))
        .route(v1::movies::GET, get(movies::get_movie_by_id))
        .route(v1::movies::CREATE, post(movies::create_movie))
        .route(v1::movies::UPDATE, put(movies::update_movie))
        .route(v1::movies::DELETE, delete(movies::delete_movie))
}

fn create_review_routes() -> Router<AppState> {
    Router::new()
        .route(v1::reviews::LIST, get(reviews::get_reviews))
        .route(v1::reviews::GET, get(reviews::get_review_by_id))
        .route(v1::reviews::CREATE, post(reviews::create_review))
        .route(v1::reviews::UPDATE, put(reviews::update_review))
        .route(v1::reviews::DELETE, delete(reviews::delete_review))
}

fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route(v1::users::LIST, get(users::get_users))
        .route(v1::users::GET, get(users::get_user_by_id))
        .route(v1::users::CREATE, post(users::create_user))
        .route(v1::users::UPDATE, put(users::update_user))
        .route(v1::users::DELETE, delete(users::delete_user))
}
