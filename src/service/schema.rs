//! TMDB wire format and its conversion into domain types.
//!
//! Deserialization is the structural validation step: a search response must
//! carry `page`, `results`, `total_pages` and `total_results`, and every movie
//! record must carry an `id` and a `title`. Every other movie field is optional
//! and may be `null`; those are replaced with empty strings or `0.0` here so
//! nothing nullable leaves this module.

use crate::domain::{MovieSummary, ResultPage};
use serde::Deserialize;

/// Largest `total_pages` value the search endpoint will serve.
pub const MAX_TOTAL_PAGES: u32 = 500;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    page: u32,
    results: Vec<MovieRecord>,
    total_pages: u32,
    total_results: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovieRecord {
    id: u64,
    title: String,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f64>,
}

/// Error body returned by TMDB alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub status_message: String,
}

impl From<MovieRecord> for MovieSummary {
    fn from(record: MovieRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            overview: record.overview.unwrap_or_default(),
            release_date: record.release_date.unwrap_or_default(),
            poster_path: record.poster_path.unwrap_or_default(),
            backdrop_path: record.backdrop_path.unwrap_or_default(),
            vote_average: record.vote_average.unwrap_or_default(),
        }
    }
}

impl From<SearchResponse> for ResultPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            page: response.page,
            movies: response.results.into_iter().map(MovieSummary::from).collect(),
            total_results: response.total_results,
            total_pages: response.total_pages.min(MAX_TOTAL_PAGES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> serde_json::Result<ResultPage> {
        serde_json::from_str::<SearchResponse>(json).map(ResultPage::from)
    }

    #[test]
    fn null_fields_normalize_to_defaults() {
        let page = parse(
            r#"{"page":1,"total_pages":1,"total_results":1,
                "results":[{"id":5,"title":"X","poster_path":null}]}"#,
        )
        .unwrap();

        assert_eq!(
            page.movies,
            vec![MovieSummary {
                id: 5,
                title: "X".to_string(),
                overview: String::new(),
                release_date: String::new(),
                poster_path: String::new(),
                backdrop_path: String::new(),
                vote_average: 0.0,
            }]
        );
    }

    #[test]
    fn present_fields_are_kept_and_extra_fields_ignored() {
        let page = parse(
            r#"{"page":2,"total_pages":3,"total_results":45,"results":[{
                "id":268,"title":"Batman","overview":"The Dark Knight of Gotham City.",
                "release_date":"1989-06-21","poster_path":"/p.jpg","backdrop_path":"/b.jpg",
                "vote_average":7.2,"adult":false,"genre_ids":[14,28],"popularity":31.4}]}"#,
        )
        .unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_results, 45);
        let movie = &page.movies[0];
        assert_eq!(movie.release_date, "1989-06-21");
        assert_eq!(movie.poster_path, "/p.jpg");
        assert!((movie.vote_average - 7.2).abs() < f64::EPSILON);
    }

    #[test]
    fn total_pages_is_capped() {
        let page = parse(r#"{"page":1,"total_pages":2817,"total_results":56321,"results":[]}"#)
            .unwrap();
        assert_eq!(page.total_pages, MAX_TOTAL_PAGES);
    }

    #[test]
    fn records_without_required_fields_are_rejected() {
        assert!(parse(r#"{"page":1,"total_pages":1,"total_results":1,"results":[{"id":1}]}"#).is_err());
        assert!(parse(r#"{"page":1,"total_pages":1,"total_results":1,"results":[{"title":"X"}]}"#).is_err());
        assert!(parse(r#"{"page":1,"total_pages":1,"total_results":1,"results":[{"id":1,"title":null}]}"#).is_err());
        assert!(parse(r#"{"page":1,"total_pages":1,"total_results":1}"#).is_err());
        assert!(parse(r#"{"results":"nope"}"#).is_err());
    }
}
