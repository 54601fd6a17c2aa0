//! Book documents and result shaping
//!
//! The backend returns each hit as one flat JSON object mixing engine
//! metadata (`@search.score`, `@search.highlights`) with every stored field.
//! Clients get a fixed shape instead: score, highlights and a `document`
//! holding exactly the fields of [`BookDocument`].

use crate::{BookSearchError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Highlighted snippets keyed by field
pub type Highlights = BTreeMap<String, Vec<String>>;

/// A search hit as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchHit {
    #[serde(rename = "@search.score")]
    pub score: f64,
    #[serde(rename = "@search.highlights", default)]
    pub highlights: Option<Highlights>,
    /// Every other property of the hit
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Book record exposed to clients
///
/// Every field must be present on the raw hit; present-but-null values are
/// kept as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    pub id: String,
    pub goodreads_book_id: Option<i64>,
    pub best_book_id: Option<i64>,
    pub work_id: Option<i64>,
    pub books_count: Option<i64>,
    pub isbn: Option<String>,
    pub isbn13: Option<String>,
    pub authors: Option<Vec<String>>,
    pub original_publication_year: Option<i64>,
    pub original_title: Option<String>,
    pub title: Option<String>,
    pub language_code: Option<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<i64>,
    pub work_ratings_count: Option<i64>,
    pub work_text_reviews_count: Option<i64>,
    pub ratings_1: Option<i64>,
    pub ratings_2: Option<i64>,
    pub ratings_3: Option<i64>,
    pub ratings_4: Option<i64>,
    pub ratings_5: Option<i64>,
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
}

impl BookDocument {
    /// Project the allow-listed fields out of a raw hit's properties
    ///
    /// # Errors
    ///
    /// Returns `BookSearchError::MissingField` for an absent field and
    /// `BookSearchError::InvalidField` for a field of the wrong type.
    pub fn project(raw: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            id: field(raw, "id")?,
            goodreads_book_id: field(raw, "goodreads_book_id")?,
            best_book_id: field(raw, "best_book_id")?,
            work_id: field(raw, "work_id")?,
            books_count: field(raw, "books_count")?,
            isbn: field(raw, "isbn")?,
            isbn13: field(raw, "isbn13")?,
            authors: field(raw, "authors")?,
            original_publication_year: field(raw, "original_publication_year")?,
            original_title: field(raw, "original_title")?,
            title: field(raw, "title")?,
            language_code: field(raw, "language_code")?,
            average_rating: field(raw, "average_rating")?,
            ratings_count: field(raw, "ratings_count")?,
            work_ratings_count: field(raw, "work_ratings_count")?,
            work_text_reviews_count: field(raw, "work_text_reviews_count")?,
            ratings_1: field(raw, "ratings_1")?,
            ratings_2: field(raw, "ratings_2")?,
            ratings_3: field(raw, "ratings_3")?,
            ratings_4: field(raw, "ratings_4")?,
            ratings_5: field(raw, "ratings_5")?,
            image_url: field(raw, "image_url")?,
            small_image_url: field(raw, "small_image_url")?,
        })
    }
}

fn field<T: DeserializeOwned>(raw: &Map<String, Value>, name: &str) -> Result<T> {
    let value = raw
        .get(name)
        .ok_or_else(|| BookSearchError::missing_field(name))?;

    T::deserialize(value).map_err(|e| BookSearchError::invalid_field(name, e.to_string()))
}

/// One shaped search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: f64,
    pub highlights: Option<Highlights>,
    pub document: BookDocument,
}

impl SearchResult {
    /// Shape a single raw hit
    pub fn from_raw(hit: &RawSearchHit) -> Result<Self> {
        Ok(Self {
            score: hit.score,
            highlights: hit.highlights.clone(),
            document: BookDocument::project(&hit.fields)?,
        })
    }
}

/// Shape raw hits in ranking order, failing on the first bad hit
pub fn shape_results(hits: &[RawSearchHit]) -> Result<Vec<SearchResult>> {
    hits.iter().map(SearchResult::from_raw).collect()
}
