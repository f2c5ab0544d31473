//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the search core. Data flows
//! one way:
//!
//! ```text
//! Key / Timer / WebRequestResult → Event → handle_event → AppState → Actions
//!                                                                       ↓
//!                     Event::LookupResolved ←── web request ←── Action::Lookup
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Typing vs. browsing input mode
//! - [`state`]: Application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
