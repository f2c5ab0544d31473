//! Search request identity.
//!
//! A [`SearchRequest`] is the `(Query, PageNumber)` pair that identifies one
//! fetch. Two requests are the same fetch exactly when both fields are equal,
//! which is what the staleness check in the session compares.

use crate::domain::ValidationError;
use std::fmt;
use std::num::NonZeroU32;

/// Minimum query length in characters, counted after trimming.
pub const MIN_QUERY_CHARS: usize = 2;

/// A validated, trimmed search term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trims `text` and checks the minimum length.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] for blank input and
    /// [`ValidationError::TooShort`] for input shorter than
    /// [`MIN_QUERY_CHARS`] characters.
    ///
    /// ```
    /// use moviesearch::search::Query;
    /// use moviesearch::domain::ValidationError;
    ///
    /// assert_eq!(Query::parse("  batman ").unwrap().as_str(), "batman");
    /// assert_eq!(Query::parse(" "), Err(ValidationError::Required));
    /// assert_eq!(Query::parse("x"), Err(ValidationError::TooShort { min: 2 }));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Required);
        }
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Err(ValidationError::TooShort { min: MIN_QUERY_CHARS });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 1-based results page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Returns `None` for page `0`.
    #[must_use]
    pub const fn new(page: u32) -> Option<Self> {
        match NonZeroU32::new(page) {
            Some(page) => Some(Self(page)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchRequest {
    query: Query,
    page: PageNumber,
}

impl SearchRequest {
    #[must_use]
    pub const fn new(query: Query, page: PageNumber) -> Self {
        Self { query, page }
    }

    /// Request for the first page of `query`.
    #[must_use]
    pub const fn first_page(query: Query) -> Self {
        Self::new(query, PageNumber::FIRST)
    }

    /// Same query, different page.
    #[must_use]
    pub fn with_page(&self, page: PageNumber) -> Self {
        Self::new(self.query.clone(), page)
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} page {}", self.query.as_str(), self.page)
    }
}
