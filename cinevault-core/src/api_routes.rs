macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

macro_rules! v2_path {
    ($path:literal) => {
        concat!("/api/v2", $path)
    };
}

/// Unversioned probes.
pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

/// Plain-DTO routes.
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    pub mod movies {
        pub const LIST: &str = v1_path!("/Movies/GetMovies");
        pub const GET: &str = v1_path!("/Movies/GetMovieById/{id}");
        pub const CREATE: &str = v1_path!("/Movies/CreateMovie");
        pub const UPDATE: &str = v1_path!("/Movies/UpdateMovie/{id}");
        pub const DELETE: &str = v1_path!("/Movies/DeleteMovie/{id}");
    }

    pub mod reviews {
        pub const LIST: &str = v1_path!("/Reviews/GetReviews");
        pub const GET: &str = v1_path!("/Reviews/GetReviewById/{id}");
        pub const CREATE: &str = v1_path!("/Reviews/CreateReview");
        pub const UPDATE: &str = v1_path!("/Reviews/UpdateReview/{id}");
        pub const DELETE: &str = v1_path!("/Reviews/DeleteReview/{id}");
    }

    pub mod users {
        pub const LIST: &str = v1_path!("/Users/GetUsers");
        pub const GET: &str = v1_path!("/Users/GetUserById/{id}");
        pub const CREATE: &str = v1_path!("/Users/CreateUser");
        pub const UPDATE: &str = v1_path!("/Users/UpdateUser/{id}");
        pub const DELETE: &str = v1_path!("/Users/DeleteUser/{id}");
    }

    pub mod app_info {
        pub const ENVIRONMENT: &str = v1_path!("/environment");
        pub const THROW_EXCEPTION: &str = v1_path!("/throw-exception");
        pub const OLD_ENDPOINT: &str = v1_path!("/old-endpoint");
    }
}

/// Envelope routes.
pub mod v2 {
    pub const ROOT: &str = "/api/v2";
    pub const VERSION: &str = "v2";

    pub mod movies {
        pub const LIST: &str = v2_path!("/Movies/GetMovies");
        pub const SEARCH: &str = v2_path!("/Movies/SearchMovies");
        pub const SEARCH_ALT: &str = v2_path!("/Movies/SearchMoviesAlt");
        pub const DETAILS: &str = v2_path!("/Movies/GetMovieDetails/{id}");
        pub const GET: &str = v2_path!("/Movies/GetMovieById/{id}");
        pub const CREATE: &str = v2_path!("/Movies/CreateMovie");
        pub const CREATE_MANY: &str = v2_path!("/Movies/CreateMovies");
        pub const UPDATE: &str = v2_path!("/Movies/UpdateMovie/{id}");
        pub const DELETE: &str = v2_path!("/Movies/DeleteMovie/{id}");
        pub const DELETE_MANY: &str = v2_path!("/Movies/DeleteMovies");
    }

    pub mod actors {
        pub const LIST: &str = v2_path!("/Actors/GetActors");
        pub const GET: &str = v2_path!("/Actors/GetActorById/{id}");
        pub const CREATE: &str = v2_path!("/Actors/CreateActor");
        pub const UPDATE: &str = v2_path!("/Actors/UpdateActor/{id}");
        pub const DELETE: &str = v2_path!("/Actors/DeleteActor/{id}");
    }

    pub mod reviews {
        pub const LIST: &str = v2_path!("/Reviews/GetReviews");
        pub const GET: &str = v2_path!("/Reviews/GetReviewById/{id}");
        pub const CREATE: &str = v2_path!("/Reviews/CreateReview");
        pub const UPDATE: &str = v2_path!("/Reviews/UpdateReview/{id}");
        pub const DELETE: &str = v2_path!("/Reviews/DeleteReview/{id}");
    }

    pub mod users {
        pub const LIST: &str = v2_path!("/Users/GetUsers");
        pub const GET: &str = v2_path!("/Users/GetUserById/{id}");
        pub const CREATE: &str = v2_path!("/Users/CreateUser");
        pub const UPDATE: &str = v2_path!("/Users/UpdateUser/{id}");
        pub const DELETE: &str = v2_path!("/Users/DeleteUser/{id}");
        pub const SEARCH: &str = v2_path!("/Users/SearchUsers");
        pub const STATS: &str = v2_path!("/Users/GetUserStats/{id}");
    }

    pub mod likes {
        pub const LIST: &str = v2_path!("/Likes/GetLikes");
        pub const GET: &str = v2_path!("/Likes/GetLikeById/{id}");
        pub const CREATE: &str = v2_path!("/Likes/CreateLike");
        pub const DELETE: &str = v2_path!("/Likes/DeleteLike/{id}");
    }

    pub mod app_info {
        pub const ENVIRONMENT: &str = v2_path!("/environment");
        pub const THROW_EXCEPTION: &str = v2_path!("/throw-exception");
        pub const NEW_ENDPOINT: &str = v2_path!("/new-endpoint");
    }
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Shorthand for substituting the `{id}` segment.
    pub fn with_id(route: &str, id: i32) -> String {
        replace_param(route, "{id}", id.to_string())
    }
}
