//! Domain layer for the movie search plugin.
//!
//! Holds the movie records and error types shared by the search session, the
//! lookup service and the UI. Nothing here depends on Zellij.
//!
//! - [`error`]: Error types, failure kinds and the crate `Result` alias
//! - [`movie`]: Movie summaries and result pages

pub mod error;
pub mod movie;

pub use error::{FailureKind, LookupError, MovieSearchError, Result, ValidationError};
pub use movie::{MovieSummary, ResultPage};
