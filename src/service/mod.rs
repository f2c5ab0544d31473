//! Movie lookup boundary.
//!
//! The search session never talks to the network. It hands a [`SearchRequest`]
//! to a [`MovieLookupService`], which sends it through an [`HttpTransport`] and
//! later turns the host's response back into a `(request, outcome)` pair.
//! Failures are logged here with their upstream details and cross into the
//! session as a bare [`FailureKind`](crate::domain::FailureKind).

pub mod context;
pub mod schema;
pub mod tmdb;

pub use schema::MAX_TOTAL_PAGES;
pub use tmdb::TmdbLookup;

use crate::domain::LookupError;
use crate::search::{LookupOutcome, SearchRequest};
use std::collections::BTreeMap;

/// Fire-and-forget HTTP GET.
///
/// Responses are delivered asynchronously by the host together with the
/// unchanged `context` map.
pub trait HttpTransport {
    fn get(&self, url: &str, headers: BTreeMap<String, String>, context: BTreeMap<String, String>);
}

/// A source of movie search results.
pub trait MovieLookupService {
    /// Starts the lookup for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error when the lookup cannot be sent at all, e.g.
    /// [`LookupError::MissingCredential`]. No response will follow in that case.
    fn lookup(&self, request: &SearchRequest) -> Result<(), LookupError>;

    /// Interprets a response to an earlier [`lookup`](Self::lookup).
    ///
    /// Returns `None` when `context` does not belong to a lookup of this service.
    fn resolve(
        &self,
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<(SearchRequest, LookupOutcome)>;
}

/// Starts a lookup and returns the outcome immediately if it could not be sent.
///
/// The returned failure must be fed to the session like any other completion.
pub fn start_lookup<S>(service: &S, request: &SearchRequest) -> Option<LookupOutcome>
where
    S: MovieLookupService + ?Sized,
{
    match service.lookup(request) {
        Ok(()) => None,
        Err(error) => {
            log_failure(request, &error);
            Some(Err(error.kind()))
        }
    }
}

pub(crate) fn log_failure(request: &SearchRequest, error: &LookupError) {
    match error {
        LookupError::MissingCredential => {
            tracing::error!(request = %request, "cannot search movies: {error}");
        }
        LookupError::Schema(_) => {
            tracing::error!(
                request = %request,
                error = %error,
                "search response no longer matches the expected format"
            );
        }
        LookupError::Network { status, .. } | LookupError::Service { status, .. } => {
            tracing::warn!(request = %request, status, error = %error, "movie search failed");
        }
    }
}
