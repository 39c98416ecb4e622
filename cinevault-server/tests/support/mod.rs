#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, TimeZone, Utc};
use cinevault_config::{
    AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    EnvironmentName, ServerConfig,
};
use cinevault_core::{
    application::unit_of_work::AppUnitOfWorkBuilder,
    crypto::{Params, PasswordCrypto},
    database::{
        PostgresDatabase,
        ports::{
            actors::MockActorsRepository, likes::MockLikesRepository,
            movies::MockMoviesRepository, reviews::MockReviewsRepository,
            users::MockUsersRepository,
        },
    },
    domain::{MovieResponse, ReviewResponse, UserResponse},
};
use cinevault_server::{AppState, create_app};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;

/// One double per repository port. Anything left without expectations
/// panics when called.
#[derive(Default)]
pub struct Repos {
    pub movies: MockMoviesRepository,
    pub actors: MockActorsRepository,
    pub reviews: MockReviewsRepository,
    pub users: MockUsersRepository,
    pub likes: MockLikesRepository,
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            primary_url: None,
            max_connections: 2,
            min_connections: 0,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
            allowed_methods: Vec::new(),
            allowed_headers: Vec::new(),
            allow_credentials: false,
        },
        auth: AuthConfig {
            password_pepper: "integration-test-pepper".into(),
        },
        environment: EnvironmentName::new("Testing"),
        metadata: ConfigMetadata::default(),
    }
}

/// Argon2 at the minimum cost so user writes stay fast.
pub fn test_crypto() -> Arc<PasswordCrypto> {
    let params = Params::new(8, 1, 1, Some(32)).expect("argon2 params");
    Arc::new(
        PasswordCrypto::with_params("integration-test-pepper", params)
            .expect("password crypto"),
    )
}

/// State whose repositories are the given doubles. The pool is lazy and
/// never opened, so probes that touch the database are out of scope here.
pub fn mock_state(repos: Repos) -> AppState {
    let unit_of_work = AppUnitOfWorkBuilder::new()
        .with_movies(Arc::new(repos.movies))
        .with_actors(Arc::new(repos.actors))
        .with_reviews(Arc::new(repos.reviews))
        .with_users(Arc::new(repos.users))
        .with_likes(Arc::new(repos.likes))
        .build()
        .expect("complete unit of work");

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://cinevault@localhost/unused")
        .expect("lazy pool");

    AppState::new(
        Arc::new(unit_of_work),
        Arc::new(PostgresDatabase::from_pool(pool)),
        Arc::new(test_config()),
        test_crypto(),
    )
}

pub fn mock_server(repos: Repos) -> TestServer {
    TestServer::new(create_app(mock_state(repos))).expect("test server")
}

/// Caller metadata every envelope carries.
pub fn meta() -> Value {
    json!({
        "username": "critic",
        "secretCode": "s3cret",
        "nameOfServer": "test-runner",
        "additionalProperties": { "client": "axum-test" }
    })
}

pub fn envelope(data: Value) -> Value {
    let mut body = meta();
    body["data"] = data;
    body
}

pub fn movie(id: i32, title: &str) -> MovieResponse {
    MovieResponse {
        id,
        title: title.to_string(),
        description: Some("A test film".into()),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
        genre: Some("Sci-Fi".into()),
        director: Some("Lana Wachowski".into()),
        average_rating: 8.5,
        review_count: 2,
    }
}

pub fn user(id: i32, username: &str) -> UserResponse {
    UserResponse {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn review(id: i32, movie_id: i32, user_id: i32, rating: i32) -> ReviewResponse {
    ReviewResponse {
        id,
        movie_id,
        movie_title: "The Matrix".into(),
        user_id,
        username: "critic".into(),
        rating,
        comment: Some("Great".into()),
        created_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap(),
    }
}

/// Full stack against a scratch database provisioned by `#[sqlx::test]`.
pub fn pg_server(pool: sqlx::PgPool) -> TestServer {
    let state = AppState::from_postgres(
        Arc::new(PostgresDatabase::from_pool(pool)),
        Arc::new(test_config()),
        test_crypto(),
    );
    TestServer::new(create_app(state)).expect("test server")
}
