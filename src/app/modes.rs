//! Input mode state for the application.
//!
//! The plugin is always in one of two modes:
//! - **Typing**: keystrokes edit the search bar
//! - **Browsing**: keystrokes move through results and pages
//!
//! The detail view is not a mode of its own; it is open whenever the search
//! session has a selected movie, and closes with it.

/// Current input handling mode.
///
/// Controls which keybindings are active, where the terminal cursor sits, and
/// the footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Characters, backspace and enter go to the search bar.
    #[default]
    Typing,

    /// j/k move the cursor, h/l change pages, enter opens details.
    Browsing,
}
