//! Query, pagination and result-state core.
//!
//! - [`request`]: `Query`, `PageNumber` and the `SearchRequest` identity
//! - [`session`]: The `SearchSession` state machine and its staleness rule

pub mod request;
pub mod session;

pub use request::{PageNumber, Query, SearchRequest, MIN_QUERY_CHARS};
pub use session::{LookupOutcome, Notification, Resolution, SearchSession, SessionStatus};
