use axum::http::StatusCode;
use cinevault_core::{
    CatalogError,
    api_routes::{self, utils::with_id},
    domain::{MovieRequest, UserRecord},
};
use mockall::predicate::eq;
use serde_json::{Value, json};

mod support;
use support::{Repos, mock_server, movie, review, test_crypto, user};

#[tokio::test]
async fn get_movies_returns_plain_array() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_list_movies()
        .times(1)
        .returning(|| Ok(vec![movie(1, "The Matrix"), movie(2, "Heat")]));
    let server = mock_server(repos);

    let response = server.get(api_routes::v1::movies::LIST).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let movies = body.as_array().expect("array body");
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["title"], "The Matrix");
    assert_eq!(movies[0]["averageRating"], 8.5);
    assert_eq!(movies[1]["reviewCount"], 2);
}

#[tokio::test]
async fn get_movie_by_id_missing_is_404() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_get_movie()
        .with(eq(99))
        .returning(|_| Ok(None));
    let server = mock_server(repos);

    let response = server.get(&with_id(api_routes::v1::movies::GET, 99)).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Movie with id 99 not found");
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn non_numeric_id_is_400_with_error_body() {
    let server = mock_server(Repos::default());

    let response = server.get("/api/v1/Movies/GetMovieById/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 400);
    assert!(body["error"]["message"].as_str().is_some_and(|m| m.contains("abc")));
}

#[tokio::test]
async fn create_movie_returns_201_without_body() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_create_movie()
        .withf(|m: &MovieRequest| m.title == "Alien" && m.genre.as_deref() == Some("Horror"))
        .times(1)
        .returning(|_| Ok(3));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v1::movies::CREATE)
        .json(&json!({ "title": "Alien", "genre": "Horror", "releaseDate": "1979-05-25" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert!(response.as_bytes().is_empty());
}

#[tokio::test]
async fn create_movie_with_blank_title_is_rejected_before_storage() {
    // No expectation on the repository: reaching it would panic.
    let server = mock_server(Repos::default());

    let response = server
        .post(api_routes::v1::movies::CREATE)
        .json(&json!({ "title": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "title is required");
}

#[tokio::test]
async fn malformed_json_is_400() {
    let server = mock_server(Repos::default());

    let response = server
        .post(api_routes::v1::movies::CREATE)
        .json(&json!({ "title": 42 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn update_movie_missing_is_404() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_update_movie()
        .withf(|id: &i32, _: &MovieRequest| *id == 5)
        .returning(|_, _| Ok(false));
    let server = mock_server(repos);

    let response = server
        .put(&with_id(api_routes::v1::movies::UPDATE, 5))
        .json(&json!({ "title": "Renamed" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_movie_returns_200() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_delete_movie()
        .with(eq(4))
        .returning(|_| Ok(true));
    let server = mock_server(repos);

    let response = server
        .delete(&with_id(api_routes::v1::movies::DELETE, 4))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn create_review_out_of_range_rating_is_400() {
    let server = mock_server(Repos::default());

    let response = server
        .post(api_routes::v1::reviews::CREATE)
        .json(&json!({ "movieId": 1, "userId": 1, "rating": 11 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_reviews_lists_denormalized_rows() {
    let mut repos = Repos::default();
    repos
        .reviews
        .expect_list_reviews()
        .returning(|| Ok(vec![review(10, 1, 2, 9)]));
    let server = mock_server(repos);

    let response = server.get(api_routes::v1::reviews::LIST).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body[0]["movieTitle"], "The Matrix");
    assert_eq!(body[0]["username"], "critic");
    assert_eq!(body[0]["rating"], 9);
}

#[tokio::test]
async fn create_user_hashes_password_before_storage() {
    let mut repos = Repos::default();
    repos
        .users
        .expect_create_user()
        .withf(|record: &UserRecord| {
            record.username == "neo"
                && record.password_hash.starts_with("$argon2id$")
                && !record.password_hash.contains("red-pill")
                && test_crypto()
                    .verify_password("red-pill", &record.password_hash)
                    .unwrap_or(false)
        })
        .times(1)
        .returning(|_| Ok(7));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v1::users::CREATE)
        .json(&json!({
            "username": "neo",
            "email": "neo@example.com",
            "password": "red-pill"
        }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn duplicate_username_is_409() {
    let mut repos = Repos::default();
    repos.users.expect_create_user().returning(|_| {
        Err(CatalogError::Conflict("Username 'neo' is already taken".into()))
    });
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v1::users::CREATE)
        .json(&json!({
            "username": "neo",
            "email": "neo@example.com",
            "password": "red-pill"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Username 'neo' is already taken");
}

#[tokio::test]
async fn storage_failures_do_not_leak_details() {
    let mut repos = Repos::default();
    repos.users.expect_get_user().returning(|_| {
        Err(CatalogError::Internal("connection reset by peer".into()))
    });
    let server = mock_server(repos);

    let response = server.get(&with_id(api_routes::v1::users::GET, 1)).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let text = response.text();
    assert!(!text.contains("connection reset"));
    assert!(text.contains("Database operation failed"));
}

#[tokio::test]
async fn get_user_by_id_returns_public_fields_only() {
    let mut repos = Repos::default();
    repos
        .users
        .expect_get_user()
        .with(eq(3))
        .returning(|id| Ok(Some(user(id, "trinity"))));
    let server = mock_server(repos);

    let response = server.get(&with_id(api_routes::v1::users::GET, 3)).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "trinity");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn app_info_endpoints() {
    let server = mock_server(Repos::default());

    let env = server.get(api_routes::v1::app_info::ENVIRONMENT).await;
    env.assert_status_ok();
    env.assert_json(&json!({ "environmentName": "Testing" }));

    let old = server.get(api_routes::v1::app_info::OLD_ENDPOINT).await;
    old.assert_status_ok();
    old.assert_json(&json!("Old version endpoint"));

    let boom = server.get(api_routes::v1::app_info::THROW_EXCEPTION).await;
    boom.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
