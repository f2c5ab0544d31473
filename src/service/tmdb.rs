//! TMDB-backed [`MovieLookupService`].
//!
//! Requests go to `GET /3/search/movie` with a bearer token. Responses are
//! matched back to their [`SearchRequest`] through the web-request context and
//! classified into an outcome:
//!
//! - 2xx with a valid body: the normalized [`ResultPage`]
//! - 2xx with a malformed body: [`LookupError::Schema`]
//! - non-2xx with a TMDB error body: [`LookupError::Service`]
//! - anything else: [`LookupError::Network`]

use super::schema::{ErrorBody, SearchResponse};
use super::{context, HttpTransport, MovieLookupService};
use crate::domain::{LookupError, ResultPage};
use crate::search::{LookupOutcome, SearchRequest};
use std::collections::BTreeMap;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Movie lookups against The Movie Database.
#[derive(Debug, Clone)]
pub struct TmdbLookup<T> {
    transport: T,
    token: Option<String>,
    base_url: String,
    language: Option<String>,
    include_adult: bool,
}

impl<T: HttpTransport> TmdbLookup<T> {
    /// Creates a lookup service. A missing or blank `token` is accepted here
    /// and reported on the first lookup.
    pub fn new(transport: T, token: Option<String>) -> Self {
        Self {
            transport,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: None,
            include_adult: false,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the ISO 639-1 language sent with every search, e.g. `en-US`.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.is_empty());
        self
    }

    #[must_use]
    pub fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Full search URL for `request`, query parameters percent-encoded.
    #[must_use]
    pub fn search_url(&self, request: &SearchRequest) -> String {
        let mut url = format!(
            "{}/search/movie?query={}&page={}&include_adult={}",
            self.base_url,
            urlencoding::encode(request.query().as_str()),
            request.page(),
            self.include_adult,
        );
        if let Some(language) = &self.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }
        url
    }

    fn headers(token: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Accept".to_string(), "application/json".to_string()),
        ])
    }

    /// Classifies a response body by status and shape.
    ///
    /// # Errors
    ///
    /// Returns the [`LookupError`] matching the response, see the module docs.
    pub fn decode_response(status: u16, body: &[u8]) -> Result<ResultPage, LookupError> {
        if (200..300).contains(&status) {
            let response: SearchResponse = serde_json::from_slice(body)?;
            return Ok(ResultPage::from(response));
        }

        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(error) => Err(LookupError::Service {
                status,
                message: error.status_message,
            }),
            Err(_) => Err(LookupError::Network {
                status,
                message: String::from_utf8_lossy(body).into_owned(),
            }),
        }
    }
}

impl<T: HttpTransport> MovieLookupService for TmdbLookup<T> {
    fn lookup(&self, request: &SearchRequest) -> Result<(), LookupError> {
        let token = self.token.as_deref().ok_or(LookupError::MissingCredential)?;
        let url = self.search_url(request);

        tracing::debug!(request = %request, "sending movie search");
        self.transport
            .get(&url, Self::headers(token), context::encode(request));
        Ok(())
    }

    fn resolve(
        &self,
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<(SearchRequest, LookupOutcome)> {
        let request = context::decode(context)?;
        let outcome = Self::decode_response(status, body).map_err(|error| {
            super::log_failure(&request, &error);
            error.kind()
        });
        Some((request, outcome))
    }
}
