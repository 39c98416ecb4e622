use std::collections::BTreeMap;

use axum::http::{Method, StatusCode, header};
use chrono::{TimeZone, Utc};
use cinevault_core::{
    CatalogError, Page,
    api_routes::{self, utils::with_id},
    domain::{
        ActorRequest, ActorResponse, LikeRequest, LikeResponse,
        MovieDeleteOutcome, MovieDeleteStatus, MovieDetailsResponse,
        MovieFilter, MovieRequest, ReviewRequest, ReviewUserResponse,
        UserQuery, UserStatsResponse,
        search::GenreMatch,
        users::{SortOrder, UserSortField},
    },
};
use mockall::predicate::eq;
use serde_json::{Value, json};

mod support;
use support::{Repos, envelope, meta, mock_server, movie, review, user};

fn assert_envelope(body: &Value, status: u16, message: &str) {
    assert_eq!(body["statusCode"], status);
    assert_eq!(body["message"], message);
    assert!(body["responseId"].is_string(), "missing responseId: {body}");
}

#[tokio::test]
async fn reads_are_served_on_options_and_post() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_list_movies()
        .times(2)
        .returning(|| Ok(vec![movie(1, "The Matrix")]));
    let server = mock_server(repos);

    for method in [Method::OPTIONS, Method::POST] {
        let response = server
            .method(method, api_routes::v2::movies::LIST)
            .json(&meta())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_envelope(&body, 200, "Movies are received");
        assert_eq!(body["data"][0]["title"], "The Matrix");
    }
}

#[tokio::test]
async fn versioned_responses_carry_version_headers() {
    let mut repos = Repos::default();
    repos.movies.expect_list_movies().returning(|| Ok(vec![]));
    let server = mock_server(repos);

    let response = server
        .method(Method::OPTIONS, api_routes::v2::movies::LIST)
        .json(&meta())
        .await;

    assert_eq!(response.header("x-api-version"), "v2");
    assert_eq!(response.header("api-supported-versions"), "1, 2");
}

#[tokio::test]
async fn unsupported_version_is_400() {
    let server = mock_server(Repos::default());

    let response = server.get("/api/v3/Movies/GetMovies").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["requested_version"], "v3");
    assert_eq!(body["supported_versions"], json!(["v1", "v2"]));
    assert_eq!(response.header("api-supported-versions"), "1, 2");
}

#[tokio::test]
async fn missing_envelope_is_400_envelope() {
    let server = mock_server(Repos::default());

    let response = server
        .method(Method::OPTIONS, api_routes::v2::movies::LIST)
        .json(&json!({ "username": "critic" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn get_movie_by_id_missing_is_404_envelope() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_get_movie()
        .with(eq(42))
        .returning(|_| Ok(None));
    let server = mock_server(repos);

    let response = server
        .method(Method::OPTIONS, &with_id(api_routes::v2::movies::GET, 42))
        .json(&meta())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_envelope(&response.json(), 404, "Movie is not found");
}

#[tokio::test]
async fn movie_details_embed_recent_reviews() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_get_movie_details()
        .with(eq(1), eq(5))
        .returning(|id, _| {
            Ok(Some(MovieDetailsResponse {
                movie: movie(id, "The Matrix"),
                last_reviews: vec![ReviewUserResponse {
                    review_id: 10,
                    rating: 9,
                    comment: Some("Whoa".into()),
                    created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                    user: user(2, "neo"),
                }],
            }))
        });
    let server = mock_server(repos);

    let response = server
        .method(Method::OPTIONS, &with_id(api_routes::v2::movies::DETAILS, 1))
        .json(&meta())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "Movie details are received");
    assert_eq!(body["data"]["title"], "The Matrix");
    assert_eq!(body["data"]["lastReviews"][0]["user"]["username"], "neo");
}

#[tokio::test]
async fn search_movies_normalizes_criteria() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_search_movies()
        .withf(|filter: &MovieFilter| {
            filter.title.as_deref() == Some("matrix")
                && filter.genre == Some(("sci-fi".to_string(), GenreMatch::CaseInsensitive))
                && filter.director.is_none()
                && filter.min_rating == Some(7.0)
        })
        .times(1)
        .returning(|_| Ok(vec![movie(1, "The Matrix")]));
    let server = mock_server(repos);

    let response = server
        .method(Method::OPTIONS, api_routes::v2::movies::SEARCH)
        .json(&envelope(json!({
            "title": "  matrix ",
            "genre": "sci-fi",
            "director": "   ",
            "avgRating": 7.0
        })))
        .await;

    response.assert_status_ok();
    assert_envelope(&response.json(), 200, "Movies are received");
}

#[tokio::test]
async fn search_movies_alt_uses_exact_genre_and_free_text() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_search_movies()
        .withf(|filter: &MovieFilter| {
            filter.text.as_deref() == Some("wachowski")
                && filter.genre == Some(("Sci-Fi".to_string(), GenreMatch::Exact))
        })
        .returning(|_| Ok(vec![]));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v2::movies::SEARCH_ALT)
        .json(&envelope(json!({ "text": "wachowski", "genre": "Sci-Fi" })))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn create_movie_returns_new_id() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_create_movie()
        .withf(|m: &MovieRequest| m.title == "Heat")
        .returning(|_| Ok(12));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v2::movies::CREATE)
        .json(&envelope(json!({ "title": "Heat", "director": "Michael Mann" })))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "Movie is created");
    assert_eq!(body["data"], 12);
}

#[tokio::test]
async fn create_movies_rejects_empty_batch() {
    let server = mock_server(Repos::default());

    let response = server
        .post(api_routes::v2::movies::CREATE_MANY)
        .json(&envelope(json!([])))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["statusCode"], 400);
}

#[tokio::test]
async fn create_movies_validates_every_item() {
    let server = mock_server(Repos::default());

    let response = server
        .post(api_routes::v2::movies::CREATE_MANY)
        .json(&envelope(json!([{ "title": "Heat" }, { "title": "" }])))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_envelope(&response.json(), 400, "title is required");
}

#[tokio::test]
async fn update_movie_returns_fresh_row() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_update_movie()
        .withf(|id: &i32, m: &MovieRequest| *id == 1 && m.title == "The Matrix Reloaded")
        .returning(|_, _| Ok(true));
    repos
        .movies
        .expect_get_movie()
        .with(eq(1))
        .returning(|id| Ok(Some(movie(id, "The Matrix Reloaded"))));
    let server = mock_server(repos);

    let response = server
        .put(&with_id(api_routes::v2::movies::UPDATE, 1))
        .json(&envelope(json!({ "title": "The Matrix Reloaded" })))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "Movie is updated");
    assert_eq!(body["data"]["title"], "The Matrix Reloaded");
}

#[tokio::test]
async fn delete_movie_requires_envelope() {
    let server = mock_server(Repos::default());

    let response = server
        .delete(&with_id(api_routes::v2::movies::DELETE, 1))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_movie_reports_outcome() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_delete_movie()
        .with(eq(3))
        .returning(|_| Ok(true));
    let server = mock_server(repos);

    let response = server
        .delete(&with_id(api_routes::v2::movies::DELETE, 3))
        .json(&meta())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "Movie is deleted");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn delete_movies_reports_each_id() {
    let mut repos = Repos::default();
    repos
        .movies
        .expect_delete_movies()
        .withf(|ids: &[i32]| ids == [1, 2, 3])
        .returning(|_| {
            Ok(vec![
                MovieDeleteOutcome { id: 1, status: MovieDeleteStatus::Deleted },
                MovieDeleteOutcome { id: 2, status: MovieDeleteStatus::HasReviews },
                MovieDeleteOutcome { id: 3, status: MovieDeleteStatus::NotFound },
            ])
        });
    let server = mock_server(repos);

    let response = server
        .delete(api_routes::v2::movies::DELETE_MANY)
        .json(&envelope(json!([1, 2, 3])))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(
        &body,
        200,
        "Movies are deleted. Check data. Actually deleted: 1.",
    );
    assert_eq!(
        body["data"],
        json!([
            "Movie with id 1 deleted successfully",
            "Movie with id 2 has reviews and cannot be deleted",
            "Movie with id 3 not found"
        ])
    );
}

#[tokio::test]
async fn create_actor_links_movies() {
    let mut repos = Repos::default();
    repos
        .actors
        .expect_create_actor()
        .withf(|a: &ActorRequest| a.full_name == "Keanu Reeves" && a.movie_ids == [1, 2])
        .returning(|_| Ok(4));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v2::actors::CREATE)
        .json(&envelope(json!({
            "fullName": "Keanu Reeves",
            "birthDate": "1964-09-02",
            "movieIds": [1, 2]
        })))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "Actor is created");
    assert_eq!(body["data"], 4);
}

#[tokio::test]
async fn get_actor_by_id_and_missing_actor() {
    let mut repos = Repos::default();
    repos.actors.expect_get_actor().returning(|id| {
        Ok((id == 4).then(|| ActorResponse {
            id,
            full_name: "Keanu Reeves".into(),
            birth_date: None,
            biography: None,
            movie_ids: vec![1],
        }))
    });
    let server = mock_server(repos);

    let found = server
        .method(Method::OPTIONS, &with_id(api_routes::v2::actors::GET, 4))
        .json(&meta())
        .await;
    found.assert_status_ok();
    let body: Value = found.json();
    assert_envelope(&body, 200, "Actor is received");
    assert_eq!(body["data"]["movieIds"], json!([1]));

    let missing = server
        .method(Method::OPTIONS, &with_id(api_routes::v2::actors::GET, 5))
        .json(&meta())
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_envelope(&missing.json(), 404, "Actor is not found");
}

#[tokio::test]
async fn create_review_sets_location() {
    let mut repos = Repos::default();
    repos
        .reviews
        .expect_create_review()
        .withf(|r: &ReviewRequest| r.movie_id == 1 && r.user_id == 2 && r.rating == 8)
        .returning(|_| Ok(30));
    repos
        .reviews
        .expect_get_review()
        .with(eq(30))
        .returning(|id| Ok(Some(review(id, 1, 2, 8))));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v2::reviews::CREATE)
        .json(&envelope(json!({ "movieId": 1, "userId": 2, "rating": 8 })))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.header(header::LOCATION),
        "/api/v2/Reviews/GetReviewById/30"
    );
    let body: Value = response.json();
    assert_envelope(&body, 201, "Created");
    assert_eq!(body["data"]["id"], 30);
}

#[tokio::test]
async fn create_review_for_unknown_movie_is_404() {
    let mut repos = Repos::default();
    repos
        .reviews
        .expect_create_review()
        .returning(|r| Err(CatalogError::not_found("Movie", r.movie_id)));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v2::reviews::CREATE)
        .json(&envelope(json!({ "movieId": 77, "userId": 2, "rating": 5 })))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_envelope(&response.json(), 404, "Movie with id 77 not found");
}

#[tokio::test]
async fn delete_review_returns_deleted_marker() {
    let mut repos = Repos::default();
    repos
        .reviews
        .expect_delete_review()
        .with(eq(30))
        .returning(|_| Ok(true));
    let server = mock_server(repos);

    let response = server
        .delete(&with_id(api_routes::v2::reviews::DELETE, 30))
        .json(&meta())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "OK");
    assert_eq!(body["data"], "Deleted");
}

#[tokio::test]
async fn create_user_returns_created_user() {
    let mut repos = Repos::default();
    repos.users.expect_create_user().returning(|_| Ok(9));
    repos
        .users
        .expect_get_user()
        .with(eq(9))
        .returning(|id| Ok(Some(user(id, "morpheus"))));
    let server = mock_server(repos);

    let response = server
        .post(api_routes::v2::users::CREATE)
        .json(&envelope(json!({
            "username": "morpheus",
            "email": "morpheus@example.com",
            "password": "blue-pill"
        })))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.header(header::LOCATION),
        "/api/v2/Users/GetUserById/9"
    );
    let body: Value = response.json();
    assert_envelope(&body, 201, "Created");
    assert_eq!(body["data"]["username"], "morpheus");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn search_users_applies_defaults_and_sorting() {
    let mut repos = Repos::default();
    repos
        .users
        .expect_search_users()
        .withf(|q: &UserQuery| {
            q.search_term.as_deref() == Some("neo")
                && q.sort_by == UserSortField::Email
                && q.sort_order == SortOrder::Desc
                && q.page_number == 2
                && q.page_size == 10
        })
        .returning(|q| Ok(Page::new(vec![user(1, "neo")], 11, q.page_number, q.page_size)));
    let server = mock_server(repos);

    let response = server
        .method(Method::OPTIONS, api_routes::v2::users::SEARCH)
        .json(&envelope(json!({
            "searchTerm": "neo",
            "sortBy": "email",
            "sortOrder": "desc",
            "pageNumber": 2
        })))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_envelope(&body, 200, "Users are received");
    assert_eq!(body["data"]["totalCount"], 11);
    assert_eq!(body["data"]["totalPages"], 2);
    assert_eq!(body["data"]["items"][0]["username"], "neo");
}

#[tokio::test]
async fn search_users_rejects_unknown_sort_field() {
    let server = mock_server(Repos::default());

    let response = server
        .method(Method::OPTIONS, api_routes::v2::users::SEARCH)
        .json(&envelope(json!({ "sortBy": "password" })))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["statusCode"], 400);
}

#[tokio::test]
async fn non_numeric_id_is_400_envelope() {
    let server = mock_server(Repos::default());

    let response = server
        .method(Method::OPTIONS, "/api/v2/Movies/GetMovieById/abc")
        .json(&meta())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["statusCode"], 400);
    assert!(body["responseId"].is_string());

    // Out of i32 range is rejected the same way.
    let response = server
        .delete("/api/v2/Users/DeleteUser/99999999999")
        .json(&meta())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["statusCode"], 400);
}

#[tokio::test]
async fn search_users_rejects_page_past_offset_range() {
    // No expectation on the repository: reaching it would panic.
    let server = mock_server(Repos::default());

    let response = server
        .method(Method::OPTIONS, api_routes::v2::users::SEARCH)
        .json(&envelope(json!({ "pageNumber": i64::MAX })))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_envelope(
        &body,
        400,
        &format!("pageNumber {} is out of range", i64::MAX),
    );
}

#[tokio::test]
async fn user_stats_found_and_missing() {
    let mut repos = Repos::default();
    repos.users.expect_user_stats().returning(|id| {
        Ok((id == 1).then(|| UserStatsResponse {
            total_reviews: 3,
            average_rating: 7.0,
            genre_stats: BTreeMap::from([("Drama".to_string(), 2), ("Sci-Fi".to_string(), 1)]),
            last_activity: Some(Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()),
        }))
    });
    let server = mock_server(repos);

    let found = server
        .method(Method::OPTIONS, &with_id(api_routes::v2::users::STATS, 1))
        .json(&meta())
        .await;
    found.assert_status_ok();
    let body: Value = found.json();
    assert_envelope(&body, 200, "User stats are received");
    assert_eq!(body["data"]["totalReviews"], 3);
    assert_eq!(body["data"]["genreStats"]["Drama"], 2);

    let missing = server
        .method(Method::OPTIONS, &with_id(api_routes::v2::users::STATS, 2))
        .json(&meta())
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert_envelope(&missing.json(), 404, "User is not found");
}

#[tokio::test]
async fn create_like_and_duplicate_like() {
    let mut repos = Repos::default();
    repos.likes.expect_create_like().returning(|like: &LikeRequest| {
        if like.user_id == 2 {
            Ok(50)
        } else {
            Err(CatalogError::Conflict("User has already liked this review".into()))
        }
    });
    repos.likes.expect_get_like().with(eq(50)).returning(|id| {
        Ok(Some(LikeResponse {
            id,
            review_id: 30,
            user_id: 2,
        }))
    });
    let server = mock_server(repos);

    let created = server
        .post(api_routes::v2::likes::CREATE)
        .json(&envelope(json!({ "reviewId": 30, "userId": 2 })))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert_eq!(
        created.header(header::LOCATION),
        "/api/v2/Likes/GetLikeById/50"
    );
    assert_envelope(&created.json(), 201, "Like is created");

    let duplicate = server
        .post(api_routes::v2::likes::CREATE)
        .json(&envelope(json!({ "reviewId": 30, "userId": 3 })))
        .await;
    duplicate.assert_status(StatusCode::CONFLICT);
    assert_envelope(&duplicate.json(), 409, "User has already liked this review");
}

#[tokio::test]
async fn app_info_endpoints() {
    let server = mock_server(Repos::default());

    let env = server.get(api_routes::v2::app_info::ENVIRONMENT).await;
    env.assert_json(&json!({ "environmentName": "Testing" }));
    assert_eq!(env.header("x-api-version"), "v2");

    let new = server.get(api_routes::v2::app_info::NEW_ENDPOINT).await;
    new.assert_json(&json!("New version endpoint"));

    let boom = server.get(api_routes::v2::app_info::THROW_EXCEPTION).await;
    boom.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn ping_is_unversioned() {
    let server = mock_server(Repos::default());

    let response = server.get(api_routes::PING).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
    assert!(response.maybe_header("x-api-version").is_none());
}
