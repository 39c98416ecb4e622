//! Movie search payloads and their normalized filter form.
//!
//! Both search endpoints reduce to a [`MovieFilter`], so the repository only
//! knows how to translate one shape into SQL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMoviesRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMoviesAltRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreMatch {
    CaseInsensitive,
    Exact,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub director: Option<String>,
    /// Matched against title, description and director.
    pub text: Option<String>,
    pub genre: Option<(String, GenreMatch)>,
    pub release_date: Option<NaiveDate>,
    pub min_rating: Option<f64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<SearchMoviesRequest> for MovieFilter {
    fn from(req: SearchMoviesRequest) -> Self {
        Self {
            title: non_blank(req.title),
            director: non_blank(req.director),
            text: None,
            genre: non_blank(req.genre)
                .map(|g| (g, GenreMatch::CaseInsensitive)),
            release_date: req.release_date,
            min_rating: req.avg_rating,
        }
    }
}

impl From<SearchMoviesAltRequest> for MovieFilter {
    fn from(req: SearchMoviesAltRequest) -> Self {
        Self {
            title: None,
            director: None,
            text: non_blank(req.text),
            genre: non_blank(req.genre).map(|g| (g, GenreMatch::Exact)),
            release_date: req.release_date,
            min_rating: req.min_rating,
        }
    }
}

impl MovieFilter {
    /// `(name, value)` pairs for every filter that will be applied.
    pub fn applied(&self) -> Vec<(&'static str, String)> {
        let mut applied = Vec::new();
        if let Some(title) = &self.title {
            applied.push(("title", title.clone()));
        }
        if let Some(director) = &self.director {
            applied.push(("director", director.clone()));
        }
        if let Some(text) = &self.text {
            applied.push(("text", text.clone()));
        }
        if let Some((genre, _)) = &self.genre {
            applied.push(("genre", genre.clone()));
        }
        if let Some(date) = self.release_date {
            applied.push(("releaseDate", date.to_string()));
        }
        if let Some(rating) = self.min_rating {
            applied.push(("minRating", rating.to_string()));
        }
        applied
    }
}

/// Escape character used in every `LIKE ... ESCAPE` clause.
pub const LIKE_ESCAPE: char = '\\';

/// Wraps `term` as a `%term%` pattern with `%`, `_` and the escape
/// character itself taken literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
