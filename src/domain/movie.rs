//! Movie domain model.
//!
//! [`MovieSummary`] is the null-free record produced by the lookup boundary and
//! [`ResultPage`] is one page of those records with the upstream pagination
//! totals. Nothing in here knows about the wire format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base URL of the TMDB image CDN.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// A movie as shown in the results table and the detail view.
///
/// Optional upstream fields are already normalized: missing strings are empty
/// and a missing vote average is `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub poster_path: String,
    pub backdrop_path: String,
    pub vote_average: f64,
}

impl MovieSummary {
    /// Parses `release_date` as an ISO calendar date.
    #[must_use]
    pub fn released_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d").ok()
    }

    /// Release year for the table column, or an empty string when unknown.
    ///
    /// ```
    /// # use moviesearch::domain::MovieSummary;
    /// let movie = MovieSummary {
    ///     id: 268,
    ///     title: "Batman".into(),
    ///     overview: String::new(),
    ///     release_date: "1989-06-21".into(),
    ///     poster_path: String::new(),
    ///     backdrop_path: String::new(),
    ///     vote_average: 7.2,
    /// };
    /// assert_eq!(movie.release_year(), "1989");
    /// ```
    #[must_use]
    pub fn release_year(&self) -> String {
        use chrono::Datelike;

        self.released_on()
            .map_or_else(String::new, |date| date.year().to_string())
    }

    /// Long-form release date for the detail view.
    ///
    /// Falls back to the raw upstream string when it is not a valid date, and
    /// to `"Unknown"` when it is empty.
    #[must_use]
    pub fn release_label(&self) -> String {
        match self.released_on() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None if self.release_date.is_empty() => "Unknown".to_string(),
            None => self.release_date.clone(),
        }
    }

    /// Rating as shown in the table and detail view, e.g. `7.2/10`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }

    /// Full-size poster URL, `None` when the movie has no poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        image_url("w500", &self.poster_path)
    }

    /// Original-size backdrop URL, `None` when the movie has no backdrop.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        image_url("original", &self.backdrop_path)
    }
}

fn image_url(size: &str, path: &str) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        Some(format!("{IMAGE_BASE_URL}/{size}{path}"))
    }
}

/// One page of search results.
///
/// `total_pages` is the upstream value capped at the service maximum; it is the
/// only page count the plugin uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub page: u32,
    pub movies: Vec<MovieSummary>,
    pub total_results: u64,
    pub total_pages: u32,
}

impl ResultPage {
    /// Returns `true` when the page holds no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.movies.iter().any(|movie| movie.id == id)
    }

    #[must_use]
    pub fn find(&self, id: u64) -> Option<&MovieSummary> {
        self.movies.iter().find(|movie| movie.id == id)
    }
}
