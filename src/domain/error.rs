//! Error types for the movie search plugin.
//!
//! [`MovieSearchError`] is the crate-wide error. The lookup boundary has its own
//! [`LookupError`] carrying upstream details for the logs, and [`FailureKind`] is
//! the detail-free value that crosses into the search session. Query validation
//! failures are [`ValidationError`]s and never leave the search bar.

use thiserror::Error;

/// The main error type for plugin operations.
#[derive(Debug, Error)]
pub enum MovieSearchError {
    /// A submitted query was rejected before any request was created.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A movie lookup could not be started or completed.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a search query was rejected.
///
/// The display strings are shown verbatim under the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The query was empty after trimming.
    #[error("Search query is required")]
    Required,

    /// The query had fewer than `min` characters after trimming.
    #[error("Enter at least {min} characters")]
    TooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },
}

/// Failure of a single lookup against the upstream movie service.
///
/// Variants keep whatever the upstream reported so it can be logged; none of it
/// is shown to the user.
#[derive(Debug, Error)]
pub enum LookupError {
    /// No API credential was configured. Raised before any request is sent.
    #[error("TMDB credential is missing (set `tmdb_token` or TMDB_TOKEN)")]
    MissingCredential,

    /// Transport failure or a non-2xx response without a TMDB error body.
    #[error("network error (status {status}): {message}")]
    Network {
        /// HTTP status reported by the host, 0 when none was received.
        status: u16,
        /// Raw response text or transport error message.
        message: String,
    },

    /// The upstream service answered with a structured error.
    #[error("service error (status {status}): {message}")]
    Service {
        /// HTTP status of the response.
        status: u16,
        /// `status_message` from the upstream error body.
        message: String,
    },

    /// The response body did not match the expected search response shape.
    #[error("malformed response: {0}")]
    Schema(#[from] serde_json::Error),
}

impl LookupError {
    /// Returns the detail-free kind handed to the search session.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MissingCredential => FailureKind::Configuration,
            Self::Network { .. } => FailureKind::Network,
            Self::Service { .. } => FailureKind::Service,
            Self::Schema(_) => FailureKind::Schema,
        }
    }
}

/// Normalized lookup failure as seen by the search session and the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The plugin is missing its API credential.
    Configuration,
    /// Transport failure or unexpected HTTP status.
    Network,
    /// The upstream service reported an error.
    Service,
    /// The upstream response failed structural validation.
    Schema,
}

impl FailureKind {
    /// Message for the persistent error panel.
    ///
    /// Configuration problems get a fixed hint; everything else reads the same
    /// to the user regardless of cause.
    #[must_use]
    pub const fn panel_message(self) -> &'static str {
        match self {
            Self::Configuration => "Movie search is not configured. Set `tmdb_token` in the plugin configuration.",
            Self::Network | Self::Service | Self::Schema => {
                "There was an error loading movies. Please try again later."
            }
        }
    }
}

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, MovieSearchError>;
