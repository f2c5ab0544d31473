//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that can change
//! the plugin: keystrokes already mapped to intent by the runtime, lookup
//! completions, and toast timers. It mutates [`AppState`] and returns whether a
//! re-render is needed together with the side effects to run.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`, `FocusSearch`, `FocusResults`
//! - **Navigation**: `CursorDown`, `CursorUp`, `OpenSelected`, `CloseDetails`
//! - **Paging**: `NextPage`, `PrevPage`, `FirstPage`, `LastPage`, `GoToPage`
//! - **System**: `LookupResolved`, `ToastExpired`, `CloseFocus`

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::search::{LookupOutcome, Notification, Resolution, SearchRequest};

/// Events triggered by user input or by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Appends a character to the search bar.
    Char(char),
    /// Removes the last character from the search bar.
    Backspace,
    /// Submits the search bar text as a new query.
    Submit,
    /// Moves keyboard focus to the search bar.
    FocusSearch,
    /// Moves keyboard focus to the results.
    FocusResults,

    /// Moves the cursor down one row (wraps to top).
    CursorDown,
    /// Moves the cursor up one row (wraps to bottom).
    CursorUp,
    /// Opens the detail view for the movie under the cursor.
    OpenSelected,
    /// Closes the detail view.
    CloseDetails,

    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Jumps to a 1-based page of the current query.
    GoToPage(u32),

    /// Hides the plugin pane.
    CloseFocus,

    /// A lookup finished, successfully or not.
    LookupResolved {
        /// The request the lookup was started for.
        request: SearchRequest,
        /// Result page or normalized failure.
        outcome: LookupOutcome,
    },

    /// A toast timer fired.
    ToastExpired,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the UI needs to be re-rendered.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime's error path uniform
/// with the rest of the crate.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            state.validation = None;
            tracing::trace!(input = %state.input, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing || state.input.pop().is_none() {
                return Ok((false, vec![]));
            }
            state.validation = None;
            Ok((true, vec![]))
        }
        Event::Submit => match state.session.submit_query(&state.input) {
            Ok(request) => {
                state.input.clear();
                state.validation = None;
                state.cursor = 0;
                state.input_mode = InputMode::Browsing;
                Ok((true, lookup(request)))
            }
            Err(error) => {
                tracing::debug!(input = %state.input, %error, "query rejected");
                state.validation = Some(error);
                Ok((true, vec![]))
            }
        },
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::CursorDown => {
            state.move_cursor_down();
            Ok((true, vec![]))
        }
        Event::CursorUp => {
            state.move_cursor_up();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(id) = state.highlighted_movie().map(|movie| movie.id) else {
                tracing::debug!("no movie under cursor");
                return Ok((false, vec![]));
            };
            Ok((state.session.select_movie(id), vec![]))
        }
        Event::CloseDetails => {
            let was_open = state.details_open();
            state.session.clear_selection();
            Ok((was_open, vec![]))
        }
        Event::NextPage => Ok(page_changed(state, |s| s.session.next_page())),
        Event::PrevPage => Ok(page_changed(state, |s| s.session.prev_page())),
        Event::FirstPage => Ok(page_changed(state, |s| s.session.go_to_page(1))),
        Event::LastPage => Ok(page_changed(state, |s| {
            let last = s.session.total_pages()?;
            s.session.go_to_page(last)
        })),
        Event::GoToPage(page) => Ok(page_changed(state, |s| s.session.go_to_page(*page))),
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::LookupResolved { request, outcome } => {
            match state.session.resolve(request, outcome.clone()) {
                Resolution::Stale | Resolution::Duplicate => Ok((false, vec![])),
                Resolution::Applied { notification } => {
                    state.clamp_cursor();
                    let actions = notification.map_or_else(Vec::new, |n| show_toast(state, n));
                    Ok((true, actions))
                }
            }
        }
        Event::ToastExpired => {
            state.pending_toast_timers = state.pending_toast_timers.saturating_sub(1);
            if state.pending_toast_timers == 0 && state.toast.take().is_some() {
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
    }
}

fn lookup(request: Option<SearchRequest>) -> Vec<Action> {
    request.map(Action::Lookup).into_iter().collect()
}

/// Applies a page transition; a `None` request means the session ignored it.
fn page_changed<F>(state: &mut AppState, change: F) -> (bool, Vec<Action>)
where
    F: FnOnce(&mut AppState) -> Option<SearchRequest>,
{
    let before = state.session.current_request().cloned();
    let request = change(state);

    if state.session.current_request().cloned() == before {
        return (false, vec![]);
    }
    state.cursor = 0;
    (true, lookup(request))
}

fn show_toast(state: &mut AppState, notification: Notification) -> Vec<Action> {
    tracing::debug!(?notification, "showing toast");
    state.toast = Some(notification);
    state.pending_toast_timers += 1;
    vec![Action::ScheduleToastExpiry {
        seconds: state.toast_seconds,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FailureKind, MovieSummary, ResultPage, ValidationError};
    use crate::search::SessionStatus;
    use crate::ui::theme::Theme;

    fn new_state() -> AppState {
        AppState::new(Theme::default(), 2.5)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_event(state, &Event::Char(c)).unwrap();
        }
    }

    fn submit(state: &mut AppState, text: &str) -> SearchRequest {
        type_text(state, text);
        let (_, actions) = handle_event(state, &Event::Submit).unwrap();
        match actions.as_slice() {
            [Action::Lookup(request)] => request.clone(),
            other => panic!("expected one lookup, got {other:?}"),
        }
    }

    fn results(page: u32, total_pages: u32, ids: &[u64]) -> LookupOutcome {
        Ok(ResultPage {
            page,
            movies: ids
                .iter()
                .map(|&id| MovieSummary {
                    id,
                    title: format!("Movie {id}"),
                    overview: String::new(),
                    release_date: String::new(),
                    poster_path: String::new(),
                    backdrop_path: String::new(),
                    vote_average: 0.0,
                })
                .collect(),
            total_results: u64::from(total_pages) * 20,
            total_pages,
        })
    }

    fn resolve(state: &mut AppState, request: &SearchRequest, outcome: LookupOutcome) -> (bool, Vec<Action>) {
        handle_event(
            state,
            &Event::LookupResolved {
                request: request.clone(),
                outcome,
            },
        )
        .unwrap()
    }

    #[test]
    fn valid_submit_clears_input_and_starts_lookup() {
        let mut state = new_state();
        let request = submit(&mut state, "  batman ");

        assert_eq!(request.query().as_str(), "batman");
        assert!(state.input.is_empty());
        assert_eq!(state.input_mode, InputMode::Browsing);
        assert_eq!(state.session.status(), SessionStatus::Loading);
    }

    #[test]
    fn invalid_submit_keeps_input_and_shows_message() {
        let mut state = new_state();
        type_text(&mut state, "x");

        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.input, "x");
        assert_eq!(state.validation, Some(ValidationError::TooShort { min: 2 }));
        assert_eq!(state.session.status(), SessionStatus::Idle);

        handle_event(&mut state, &Event::Char('y')).unwrap();
        assert_eq!(state.validation, None);
    }

    #[test]
    fn typing_is_ignored_while_browsing() {
        let mut state = new_state();
        handle_event(&mut state, &Event::FocusResults).unwrap();

        let (render, _) = handle_event(&mut state, &Event::Char('j')).unwrap();
        assert!(!render);
        assert!(state.input.is_empty());
    }

    #[test]
    fn stale_completion_does_not_render() {
        let mut state = new_state();
        let batman = submit(&mut state, "batman");
        handle_event(&mut state, &Event::FocusSearch).unwrap();
        let superman = submit(&mut state, "superman");

        let (render, _) = resolve(&mut state, &superman, results(1, 1, &[9]));
        assert!(render);
        let (render, actions) = resolve(&mut state, &batman, results(1, 5, &[1, 2]));
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.session.page().unwrap().movies[0].id, 9);
    }

    #[test]
    fn empty_result_shows_one_toast_and_arms_timer() {
        let mut state = new_state();
        let request = submit(&mut state, "zzzzzz");

        let (_, actions) = resolve(&mut state, &request, results(1, 0, &[]));
        assert_eq!(actions, vec![Action::ScheduleToastExpiry { seconds: 2.5 }]);
        assert_eq!(state.toast, Some(Notification::NoResults));

        let (_, again) = resolve(&mut state, &request, results(1, 0, &[]));
        assert!(again.is_empty());
        assert_eq!(state.pending_toast_timers, 1);
    }

    #[test]
    fn toast_stays_until_its_latest_timer_fires() {
        let mut state = new_state();
        let first = submit(&mut state, "batman");
        resolve(&mut state, &first, Err(FailureKind::Network));

        handle_event(&mut state, &Event::FocusSearch).unwrap();
        let second = submit(&mut state, "batman");
        resolve(&mut state, &second, Err(FailureKind::Network));
        assert_eq!(state.pending_toast_timers, 2);

        let (render, _) = handle_event(&mut state, &Event::ToastExpired).unwrap();
        assert!(!render);
        assert_eq!(state.toast, Some(Notification::Failure));

        let (render, _) = handle_event(&mut state, &Event::ToastExpired).unwrap();
        assert!(render);
        assert_eq!(state.toast, None);
    }

    #[test]
    fn paging_issues_lookups_and_resets_cursor() {
        let mut state = new_state();
        let request = submit(&mut state, "batman");
        resolve(&mut state, &request, results(1, 3, &[1, 2, 3]));
        handle_event(&mut state, &Event::CursorDown).unwrap();
        assert_eq!(state.cursor, 1);

        let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(render);
        assert_eq!(actions, vec![Action::Lookup(request.with_page(crate::search::PageNumber::new(2).unwrap()))]);
        assert_eq!(state.cursor, 0);

        let (_, actions) = handle_event(&mut state, &Event::LastPage).unwrap();
        assert!(matches!(&actions[..], [Action::Lookup(r)] if r.page().get() == 3));
    }

    #[test]
    fn paging_noops_do_not_render() {
        let mut state = new_state();
        assert_eq!(handle_event(&mut state, &Event::NextPage).unwrap(), (false, vec![]));

        let request = submit(&mut state, "batman");
        resolve(&mut state, &request, results(1, 2, &[1]));
        assert_eq!(handle_event(&mut state, &Event::PrevPage).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::FirstPage).unwrap(), (false, vec![]));
        assert_eq!(handle_event(&mut state, &Event::GoToPage(9)).unwrap(), (false, vec![]));
    }

    #[test]
    fn details_open_and_close() {
        let mut state = new_state();
        let request = submit(&mut state, "batman");
        resolve(&mut state, &request, results(1, 1, &[7, 8]));

        handle_event(&mut state, &Event::CursorDown).unwrap();
        let (render, _) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(render);
        assert_eq!(state.session.selected_movie().unwrap().id, 8);

        let (render, _) = handle_event(&mut state, &Event::CloseDetails).unwrap();
        assert!(render);
        assert!(!state.details_open());

        let (render, _) = handle_event(&mut state, &Event::CloseDetails).unwrap();
        assert!(!render);
    }

    #[test]
    fn open_selected_without_results_is_ignored() {
        let mut state = new_state();
        assert_eq!(handle_event(&mut state, &Event::OpenSelected).unwrap(), (false, vec![]));
    }

    #[test]
    fn close_focus_is_forwarded() {
        let mut state = new_state();
        assert_eq!(
            handle_event(&mut state, &Event::CloseFocus).unwrap(),
            (false, vec![Action::CloseFocus])
        );
    }
}
