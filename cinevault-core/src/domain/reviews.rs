use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    COMMENT_MAX, Validate, ValidationError, max_len, rating,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub movie_id: i32,
    pub user_id: i32,
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Validate for ReviewRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        rating(self.rating)?;
        max_len("comment", self.comment.as_deref(), COMMENT_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i32,
    pub movie_id: i32,
    pub movie_title: String,
    pub user_id: i32,
    pub username: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
