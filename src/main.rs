//! Zellij plugin wrapper and entry point.
//!
//! Translates Zellij events into library [`Event`]s, runs them through
//! [`handle_event`], and carries out the returned [`Action`]s with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`, build the
//!    TMDB lookup service
//! 2. **Permissions**: Request `WebAccess`; lookups issued before the answer
//!    are queued
//! 3. **Update**: Keys, web responses and toast timers become library events
//! 4. **Render**: Delegated to [`moviesearch::ui::render`]
//!
//! # Event Mapping
//!
//! - `Key` → editing, navigation and paging events (see below)
//! - `WebRequestResult` → `Event::LookupResolved` via the lookup service
//! - `Timer` → `Event::ToastExpired`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Search bar:
//! - Characters / `Backspace`: Edit the query
//! - `Enter`: Search
//! - `Esc` / `Tab` / `Down`: Focus results
//!
//! Results:
//! - `j`/`k`/arrows: Move
//! - `Enter`: Open details
//! - `l`/`Right`/`n`, `h`/`Left`/`p`: Next / previous page
//! - `g` / `G`: First / last page
//! - `/` / `Esc`: Focus search bar
//! - `q`: Hide plugin
//!
//! Details open:
//! - `Esc` / `Enter` / `q`: Close details
//!
//! Only `wasm32` builds contain the plugin; a native build produces a stub
//! that explains how to build it.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use moviesearch::domain::FailureKind;
#[cfg(target_family = "wasm")]
use moviesearch::search::SearchRequest;
#[cfg(target_family = "wasm")]
use moviesearch::service::{start_lookup, HttpTransport, MovieLookupService, TmdbLookup};
#[cfg(target_family = "wasm")]
use moviesearch::{handle_event, Action, Config, Event, InputMode};
#[cfg(target_family = "wasm")]
use std::collections::BTreeMap;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!(
        "moviesearch is a Zellij plugin. Build it with \
         `cargo build --release --target wasm32-wasip1` and load \
         target/wasm32-wasip1/release/moviesearch.wasm from a Zellij layout."
    );
}

/// Sends lookups through the host's `web_request` API.
#[cfg(target_family = "wasm")]
#[derive(Debug, Default, Clone, Copy)]
struct ZellijTransport;

#[cfg(target_family = "wasm")]
impl HttpTransport for ZellijTransport {
    fn get(&self, url: &str, headers: BTreeMap<String, String>, context: BTreeMap<String, String>) {
        tracing::debug!(url, "sending web request");
        web_request(url, HttpVerb::Get, headers, vec![], context);
    }
}

#[cfg(target_family = "wasm")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebAccess {
    Pending,
    Granted,
    Denied,
}

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the lookup service and the web-access
/// permission, which only exist inside Zellij.
#[cfg(target_family = "wasm")]
struct State {
    /// Core application state from library layer.
    app: moviesearch::AppState,

    service: TmdbLookup<ZellijTransport>,

    web_access: WebAccess,

    /// Lookups requested before web access was granted.
    deferred: Vec<SearchRequest>,
}

#[cfg(target_family = "wasm")]
impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: moviesearch::initialize(&default_config),
            service: default_config.lookup_service(ZellijTransport),
            web_access: WebAccess::Pending,
            deferred: Vec::new(),
        }
    }
}

#[cfg(target_family = "wasm")]
impl ZellijPlugin for State {
    /// Parses configuration, builds state and the lookup service, requests
    /// web access and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        moviesearch::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        self.app = moviesearch::initialize(&config);
        self.service = config.lookup_service(ZellijTransport);
        if config.tmdb_token.is_none() {
            tracing::warn!("no tmdb_token configured; searches will fail");
        }

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should
    /// re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match self.service.resolve(status, &body, &context) {
                    Some((request, outcome)) => Event::LookupResolved { request, outcome },
                    None => {
                        tracing::debug!(status, "ignoring web response without lookup context");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::ToastExpired,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        moviesearch::ui::render(&self.app, rows, cols);
    }
}

#[cfg(target_family = "wasm")]
impl State {
    /// Runs one library event and its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((mut should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in actions {
                    should_render |= self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        if self.app.details_open() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Some(Event::CloseDetails),
                _ => None,
            };
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Backspace => Event::Backspace,
                BareKey::Esc | BareKey::Tab | BareKey::Down => Event::FocusResults,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Right | BareKey::Char('l' | 'n') => Event::NextPage,
                BareKey::Left | BareKey::Char('h' | 'p') => Event::PrevPage,
                BareKey::Char('g') => Event::FirstPage,
                BareKey::Char('G') => Event::LastPage,
                BareKey::Esc | BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    /// Records the permission answer and releases queued lookups.
    ///
    /// Every queued request is sent, stale ones included, so that each one
    /// resolves and leaves the session's in-flight set.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        let deferred = std::mem::take(&mut self.deferred);
        let mut should_render = false;
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!(queued = deferred.len(), "web access granted");
                self.web_access = WebAccess::Granted;
                for request in deferred {
                    should_render |= self.send_lookup(request);
                }
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - movie search unavailable");
                self.web_access = WebAccess::Denied;
                for request in deferred {
                    should_render |= self.fail_lookup(request);
                }
            }
        }
        should_render
    }

    fn send_lookup(&mut self, request: SearchRequest) -> bool {
        match start_lookup(&self.service, &request) {
            None => false,
            Some(outcome) => self.dispatch(&Event::LookupResolved { request, outcome }),
        }
    }

    fn fail_lookup(&mut self, request: SearchRequest) -> bool {
        self.dispatch(&Event::LookupResolved {
            request,
            outcome: Err(FailureKind::Network),
        })
    }

    /// Carries out an action; returns `true` if it changed what is shown.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::Lookup(request) => match self.web_access {
                WebAccess::Granted => self.send_lookup(request),
                WebAccess::Pending => {
                    tracing::debug!(request = %request, "queueing lookup until web access is granted");
                    self.deferred.push(request);
                    false
                }
                WebAccess::Denied => self.fail_lookup(request),
            },
            Action::ScheduleToastExpiry { seconds } => {
                set_timeout(seconds);
                false
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                false
            }
        }
    }
}
