use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    EMAIL_MAX, PAGE_SIZE_MAX, PASSWORD_MAX, USERNAME_MAX, Validate,
    ValidationError, required,
};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Validate for UserRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        required("username", &self.username, USERNAME_MAX)?;
        required("email", &self.email, EMAIL_MAX)?;
        required("password", &self.password, PASSWORD_MAX)
    }
}

/// A validated user whose password has already been hashed; this is what
/// the repository layer persists.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub genre_stats: BTreeMap<String, i64>,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Genre bucket used for reviews of movies that have no genre recorded.
pub const UNKNOWN_GENRE: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    #[default]
    Username,
    Email,
    CreatedAt,
}

impl UserSortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for UserSortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "createdat" | "created_at" => Ok(Self::CreatedAt),
            _ => Err(ValidationError::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ValidationError::UnknownSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUsersRequest {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub created_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_before: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// [`SearchUsersRequest`] after defaults are applied and sort keys parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub search_term: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub sort_by: UserSortField,
    pub sort_order: SortOrder,
    pub page_number: i64,
    pub page_size: i64,
}

impl UserQuery {
    /// Rows skipped before the requested page. `try_from` rejects pages
    /// whose offset does not fit in an `i64`.
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }
}

impl TryFrom<SearchUsersRequest> for UserQuery {
    type Error = ValidationError;

    fn try_from(req: SearchUsersRequest) -> Result<Self, Self::Error> {
        let sort_by = req
            .sort_by
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        let sort_order = req
            .sort_order
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();

        let page_number = req.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
        if page_number < 1 {
            return Err(ValidationError::InvalidPageNumber);
        }
        let page_size = req.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=PAGE_SIZE_MAX).contains(&page_size) {
            return Err(ValidationError::InvalidPageSize);
        }
        if (page_number - 1).checked_mul(page_size).is_none() {
            return Err(ValidationError::PageOutOfRange(page_number));
        }

        Ok(Self {
            search_term: req
                .search_term
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            created_after: req.created_after,
            created_before: req.created_before,
            sort_by,
            sort_order,
            page_number,
            page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_redacted_in_debug() {
        let req = UserRequest {
            username: "neo".into(),
            email: "neo@zion.io".into(),
            password: "redpill".into(),
        };
        let rendered = format!("{req:?}");
        assert!(rendered.contains("neo@zion.io"));
        assert!(!rendered.contains("redpill"));
    }

    #[test]
    fn user_request_requires_every_field() {
        let req = UserRequest {
            username: "neo".into(),
            email: String::new(),
            password: "redpill".into(),
        };
        assert_eq!(
            req.validate(),
            Err(ValidationError::Required { field: "email" })
        );
    }

    #[test]
    fn query_defaults() {
        let query = UserQuery::try_from(SearchUsersRequest::default()).unwrap();
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.sort_by, UserSortField::Username);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn sort_keys_are_case_insensitive() {
        let query = UserQuery::try_from(SearchUsersRequest {
            sort_by: Some("CreatedAt".into()),
            sort_order: Some("DESC".into()),
            page_number: Some(3),
            page_size: Some(20),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.sort_by, UserSortField::CreatedAt);
        assert_eq!(query.sort_order, SortOrder::Desc);
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let err = UserQuery::try_from(SearchUsersRequest {
            sort_by: Some("password".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::UnknownSortField("password".into()));
    }

    #[test]
    fn page_bounds_are_enforced() {
        let zero_page = SearchUsersRequest {
            page_number: Some(0),
            ..Default::default()
        };
        assert_eq!(
            UserQuery::try_from(zero_page),
            Err(ValidationError::InvalidPageNumber)
        );

        let huge_page = SearchUsersRequest {
            page_size: Some(101),
            ..Default::default()
        };
        assert_eq!(
            UserQuery::try_from(huge_page),
            Err(ValidationError::InvalidPageSize)
        );
    }

    #[test]
    fn page_offset_overflow_is_rejected() {
        let request = SearchUsersRequest {
            page_number: Some(i64::MAX),
            ..Default::default()
        };
        assert_eq!(
            UserQuery::try_from(request),
            Err(ValidationError::PageOutOfRange(i64::MAX))
        );

        // Largest page that still fits at the maximum page size.
        let last = i64::MAX / PAGE_SIZE_MAX + 1;
        let query = UserQuery::try_from(SearchUsersRequest {
            page_number: Some(last),
            page_size: Some(PAGE_SIZE_MAX),
            ..Default::default()
        })
        .unwrap();
        assert!(query.offset() > 0);
    }

    #[test]
    fn blank_search_term_is_ignored() {
        let query = UserQuery::try_from(SearchUsersRequest {
            search_term: Some("  ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.search_term, None);
    }
}
