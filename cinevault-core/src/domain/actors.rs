use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::validation::{
    BIOGRAPHY_MAX, FULL_NAME_MAX, Validate, ValidationError, max_len, required,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorRequest {
    pub full_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub biography: Option<String>,
    /// Filmography. Replaces the existing links on update.
    #[serde(default)]
    pub movie_ids: Vec<i32>,
}

impl Validate for ActorRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required("fullName", &self.full_name, FULL_NAME_MAX)?;
        max_len("biography", self.biography.as_deref(), BIOGRAPHY_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct ActorResponse {
    pub id: i32,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub biography: Option<String>,
    pub movie_ids: Vec<i32>,
}
