//! The search session state machine.
//!
//! [`SearchSession`] owns the current [`SearchRequest`], the outcome of the
//! fetch for that request, the known page count for the current query, and the
//! selected movie. Every user action and every fetch completion goes through
//! one of its transition methods; the UI only reads [`SearchSession::status`].
//!
//! # Staleness
//!
//! Fetches are never aborted. When one resolves, its request is compared with
//! the session's current request *at resolution time*; a mismatch means a newer
//! query or page change superseded it and the result is dropped without any
//! state change or notification. This makes the last issued request win no
//! matter in which order responses arrive.
//!
//! # Deduplication
//!
//! The session remembers which requests have a fetch outstanding. Issuing a
//! request that is already in flight does not start a second fetch, and a
//! second completion for an already resolved request is ignored, so each
//! issued request produces at most one notification.

use super::request::{PageNumber, Query, SearchRequest};
use crate::domain::{FailureKind, MovieSummary, ResultPage, ValidationError};
use std::collections::HashSet;

/// Result of one lookup as delivered to the session.
pub type LookupOutcome = Result<ResultPage, FailureKind>;

/// Derived session status for the current request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionStatus<'a> {
    /// No query has been submitted yet.
    Idle,
    /// The fetch for the current request has not resolved.
    Loading,
    /// The current request returned at least one movie.
    Loaded(&'a ResultPage),
    /// The current request returned no movies.
    Empty,
    /// The current request failed.
    Failed(FailureKind),
}

/// One-time event for the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The current request succeeded with zero results.
    NoResults,
    /// The current request failed.
    Failure,
}

impl Notification {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoResults => "No movies found for your request.",
            Self::Failure => "Something went wrong. Try again later.",
        }
    }
}

/// What happened to a fetch completion handed to [`SearchSession::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The completion belonged to a superseded request and was dropped.
    Stale,
    /// The current request had already resolved; the completion was dropped.
    Duplicate,
    /// The completion was applied to the session.
    Applied {
        /// Notification to emit for this transition, if any.
        notification: Option<Notification>,
    },
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Loaded(ResultPage),
    Empty,
    Failed(FailureKind),
}

/// Query, pagination and result state for one plugin instance.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    current: Option<SearchRequest>,
    outcome: Option<Outcome>,
    total_pages: Option<u32>,
    selected: Option<u64>,
    in_flight: HashSet<SearchRequest>,
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a new search term.
    ///
    /// Resets the page to 1 and makes any earlier fetch stale. Returns the
    /// request to fetch, or `None` when an identical request is already in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for blank or too-short input; the session
    /// is left untouched.
    pub fn submit_query(&mut self, text: &str) -> Result<Option<SearchRequest>, ValidationError> {
        let query = Query::parse(text)?;

        if self.current.as_ref().map(SearchRequest::query) != Some(&query) {
            self.total_pages = None;
        }

        tracing::debug!(query = %query, "query submitted");
        Ok(self.issue(SearchRequest::first_page(query)))
    }

    /// Moves to page `page` of the current query.
    ///
    /// Returns `None` without changing anything when the session is idle, the
    /// page count is not known yet, `page` is outside `1..=total_pages`, or
    /// `page` is already the current page. Also returns `None` when the new
    /// request is already in flight.
    pub fn go_to_page(&mut self, page: u32) -> Option<SearchRequest> {
        let current = self.current.as_ref()?;
        let total_pages = self.total_pages?;
        let target = PageNumber::new(page).filter(|p| p.get() <= total_pages)?;

        if target == current.page() {
            return None;
        }

        tracing::debug!(from = %current.page(), to = %target, total_pages, "changing page");
        let request = current.with_page(target);
        self.issue(request)
    }

    /// Moves one page forward. See [`Self::go_to_page`].
    pub fn next_page(&mut self) -> Option<SearchRequest> {
        let page = self.current.as_ref()?.page().get();
        self.go_to_page(page.saturating_add(1))
    }

    /// Moves one page back. See [`Self::go_to_page`].
    pub fn prev_page(&mut self) -> Option<SearchRequest> {
        let page = self.current.as_ref()?.page().get();
        self.go_to_page(page.saturating_sub(1))
    }

    /// Selects the movie with `id` if the current result page contains it.
    ///
    /// Returns `false` and leaves the selection unchanged otherwise.
    pub fn select_movie(&mut self, id: u64) -> bool {
        if self.page().is_some_and(|page| page.contains(id)) {
            self.selected = Some(id);
            true
        } else {
            tracing::debug!(id, "ignoring selection of movie outside the current page");
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Applies a fetch completion for `request`.
    pub fn resolve(&mut self, request: &SearchRequest, outcome: LookupOutcome) -> Resolution {
        self.in_flight.remove(request);

        if self.current.as_ref() != Some(request) {
            tracing::debug!(request = %request, "dropping stale lookup result");
            return Resolution::Stale;
        }
        if self.outcome.is_some() {
            tracing::debug!(request = %request, "dropping duplicate lookup result");
            return Resolution::Duplicate;
        }

        let notification = match outcome {
            Ok(page) if page.is_empty() => {
                tracing::debug!(request = %request, "lookup returned no movies");
                self.total_pages = Some(page.total_pages);
                self.selected = None;
                self.outcome = Some(Outcome::Empty);
                Some(Notification::NoResults)
            }
            Ok(page) => {
                tracing::debug!(
                    request = %request,
                    movies = page.movies.len(),
                    total_pages = page.total_pages,
                    "lookup applied"
                );
                self.total_pages = Some(page.total_pages);
                self.selected = self.selected.filter(|id| page.contains(*id));
                self.outcome = Some(Outcome::Loaded(page));
                None
            }
            Err(kind) => {
                tracing::debug!(request = %request, kind = ?kind, "lookup failed");
                self.selected = None;
                self.outcome = Some(Outcome::Failed(kind));
                Some(Notification::Failure)
            }
        };

        Resolution::Applied { notification }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus<'_> {
        match (&self.current, &self.outcome) {
            (None, _) => SessionStatus::Idle,
            (Some(_), None) => SessionStatus::Loading,
            (Some(_), Some(Outcome::Loaded(page))) => SessionStatus::Loaded(page),
            (Some(_), Some(Outcome::Empty)) => SessionStatus::Empty,
            (Some(_), Some(Outcome::Failed(kind))) => SessionStatus::Failed(*kind),
        }
    }

    /// The request whose result is (or will be) displayed.
    #[must_use]
    pub const fn current_request(&self) -> Option<&SearchRequest> {
        self.current.as_ref()
    }

    /// The displayed result page, present only in the `Loaded` state.
    #[must_use]
    pub fn page(&self) -> Option<&ResultPage> {
        match &self.outcome {
            Some(Outcome::Loaded(page)) => Some(page),
            _ => None,
        }
    }

    /// Page count known for the current query.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.page()?.find(self.selected?)
    }

    /// Returns `true` while a fetch for `request` is outstanding.
    #[must_use]
    pub fn is_in_flight(&self, request: &SearchRequest) -> bool {
        self.in_flight.contains(request)
    }

    fn issue(&mut self, request: SearchRequest) -> Option<SearchRequest> {
        self.current = Some(request.clone());
        self.outcome = None;
        self.selected = None;

        if self.in_flight.insert(request.clone()) {
            Some(request)
        } else {
            tracing::debug!(request = %request, "lookup already in flight, not refetching");
            None
        }
    }
}
