//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never touches the network, timers or panes itself. It
//! returns a `Vec<Action>` and the runtime in `main.rs` executes them in order.

use crate::search::SearchRequest;

/// Commands produced by the event handler for the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Starts a lookup for the request.
    ///
    /// The completion comes back later as `Event::LookupResolved`; if the lookup
    /// cannot be sent at all the runtime feeds the failure back the same way.
    Lookup(SearchRequest),

    /// Arms a one-shot timer that ends in `Event::ToastExpired`.
    ScheduleToastExpiry {
        /// Delay before the toast is dismissed.
        seconds: f64,
    },

    /// Hides the plugin pane.
    CloseFocus,
}
