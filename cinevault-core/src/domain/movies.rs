use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::users::UserResponse;
use super::validation::{
    DESCRIPTION_MAX, DIRECTOR_MAX, GENRE_MAX, TITLE_MAX, Validate,
    ValidationError, max_len, required,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl Validate for MovieRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title, TITLE_MAX)?;
        max_len("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        max_len("genre", self.genre.as_deref(), GENRE_MAX)?;
        max_len("director", self.director.as_deref(), DIRECTOR_MAX)
    }
}

/// A movie with its review aggregates. Only live reviews contribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub average_rating: f64,
    pub review_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUserResponse {
    pub review_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailsResponse {
    #[serde(flatten)]
    pub movie: MovieResponse,
    pub last_reviews: Vec<ReviewUserResponse>,
}

/// Number of reviews embedded in [`MovieDetailsResponse::last_reviews`].
pub const DETAILS_REVIEW_LIMIT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MovieDeleteStatus {
    Deleted,
    NotFound,
    HasReviews,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDeleteOutcome {
    pub id: i32,
    pub status: MovieDeleteStatus,
}

impl MovieDeleteOutcome {
    pub fn message(&self) -> String {
        match self.status {
            MovieDeleteStatus::Deleted => {
                format!("Movie with id {} deleted successfully", self.id)
            }
            MovieDeleteStatus::NotFound => {
                format!("Movie with id {} not found", self.id)
            }
            MovieDeleteStatus::HasReviews => format!(
                "Movie with id {} has reviews and cannot be deleted",
                self.id
            ),
        }
    }
}

/// Distinct ids in first-seen order.
pub fn dedup_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> MovieRequest {
        MovieRequest {
            title: title.to_string(),
            description: None,
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
            genre: Some("Sci-Fi".into()),
            director: Some("Lana Wachowski".into()),
        }
    }

    #[test]
    fn movie_request_requires_title() {
        assert!(request("The Matrix").validate().is_ok());
        assert_eq!(
            request("").validate(),
            Err(ValidationError::Required { field: "title" })
        );
    }

    #[test]
    fn movie_request_rejects_long_genre() {
        let mut req = request("The Matrix");
        req.genre = Some("x".repeat(GENRE_MAX + 1));
        assert!(matches!(
            req.validate(),
            Err(ValidationError::TooLong { field: "genre", .. })
        ));
    }

    #[test]
    fn movie_request_accepts_missing_optionals() {
        let req: MovieRequest =
            serde_json::from_str(r#"{"title":"Alien"}"#).unwrap();
        assert_eq!(req.release_date, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn details_flatten_movie_fields() {
        let details = MovieDetailsResponse {
            movie: MovieResponse {
                id: 7,
                title: "Heat".into(),
                description: None,
                release_date: NaiveDate::from_ymd_opt(1995, 12, 15),
                genre: Some("Crime".into()),
                director: Some("Michael Mann".into()),
                average_rating: 9.0,
                review_count: 1,
            },
            last_reviews: Vec::new(),
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["releaseDate"], "1995-12-15");
        assert_eq!(json["averageRating"], 9.0);
        assert!(json["lastReviews"].as_array().unwrap().is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn delete_outcome_messages() {
        let skipped = MovieDeleteOutcome {
            id: 4,
            status: MovieDeleteStatus::HasReviews,
        };
        assert_eq!(
            skipped.message(),
            "Movie with id 4 has reviews and cannot be deleted"
        );
    }
}
