//! moviesearch: a Zellij plugin for searching The Movie Database (TMDB).
//!
//! Type a title, press Enter, and browse paginated results in a floating
//! pane. Selecting a row opens a detail view with the release date, rating,
//! overview and image links.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Key/timer/response
//! │  - Event handling, actions                          │    events in, actions
//! │  - View model computation                           │    out
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search Core   │   │ Lookup Service│
//! │ (ui/)         │   │ (search/)     │   │ (service/)    │
//! │ - Rendering   │   │ - Validation  │   │ - TMDB URL    │
//! │ - Theming     │   │ - Pagination  │   │ - JSON schema │
//! │ - Components  │   │ - Staleness   │   │ - Errors      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/) · Paths (infrastructure/)         │
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Movie records and error types
//! - [`search`]: Query validation, pagination and the staleness rule
//! - [`service`]: TMDB lookup over the host's web-request API
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Sandbox paths
//! - [`observability`]: OpenTelemetry tracing to a local OTLP/JSON file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/moviesearch.wasm" {
//!         tmdb_token "eyJhbGciOi..."
//!         language "en-US"
//!         include_adult "false"
//!         toast_seconds "3"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Lifecycle
//!
//! 1. Enter in the search bar validates the query and returns
//!    [`Action::Lookup`] for page 1.
//! 2. The shim sends it through [`service::TmdbLookup`], which encodes the
//!    request identity into the web-request context.
//! 3. The host answers with `WebRequestResult`; the service decodes the
//!    context and body back into a request and an outcome.
//! 4. [`Event::LookupResolved`] feeds that pair to the session, which drops
//!    it if a newer request has been issued in the meantime.
//!
//! # Example
//!
//! ```rust
//! use moviesearch::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//!
//! for c in "heat".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(&actions[..], [Action::Lookup(request)] if request.page().get() == 1));
//! # Ok::<(), moviesearch::MovieSearchError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod service;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{MovieSearchError, Result};
pub use ui::Theme;

use service::{HttpTransport, TmdbLookup};
use std::collections::BTreeMap;

/// Environment variable consulted when `tmdb_token` is not configured.
pub const TOKEN_ENV_VAR: &str = "TMDB_TOKEN";

/// Seconds a toast stays on screen unless configured otherwise.
pub const DEFAULT_TOAST_SECONDS: f64 = 3.0;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/moviesearch.wasm" {
///     tmdb_token "eyJhbGciOi..."
///     theme_file "~/.config/moviesearch/theme.toml"
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// TMDB API read access token, sent as a bearer token.
    ///
    /// Falls back to the `TMDB_TOKEN` environment variable. Searches fail
    /// with a configuration error when neither is set.
    pub tmdb_token: Option<String>,

    /// ISO 639-1 language tag for titles and overviews, e.g. `de-DE`.
    pub language: Option<String>,

    /// Include adult titles in results. Default: `false`
    pub include_adult: bool,

    /// How long notifications stay visible. Default: `3.0`
    pub toast_seconds: f64,

    /// Built-in theme name.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` expands to the host home.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for spans, e.g. `debug` or
    /// `moviesearch::service=trace`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_token: None,
            language: None,
            include_adult: false,
            toast_seconds: DEFAULT_TOAST_SECONDS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as unset. Malformed values are logged and replaced
    /// by their defaults rather than failing the plugin load.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use moviesearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("tmdb_token".to_string(), "secret".to_string());
    /// map.insert("include_adult".to_string(), "true".to_string());
    /// map.insert("toast_seconds".to_string(), "5".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.tmdb_token.as_deref(), Some("secret"));
    /// assert!(config.include_adult);
    /// assert_eq!(config.toast_seconds, 5.0);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        Self::from_map_and_env(config, std::env::var(TOKEN_ENV_VAR).ok())
    }

    fn from_map_and_env(config: &BTreeMap<String, String>, env_token: Option<String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let include_adult = get("include_adult").map_or(false, |raw| {
            parse_bool(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring include_adult");
                false
            })
        });

        let toast_seconds = get("toast_seconds").map_or(DEFAULT_TOAST_SECONDS, |raw| {
            parse_seconds(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring toast_seconds");
                DEFAULT_TOAST_SECONDS
            })
        });

        Self {
            tmdb_token: get("tmdb_token")
                .or_else(|| env_token.filter(|t| !t.trim().is_empty())),
            language: get("language"),
            include_adult,
            toast_seconds,
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Builds the TMDB lookup service for this configuration.
    #[must_use]
    pub fn lookup_service<T: HttpTransport>(&self, transport: T) -> TmdbLookup<T> {
        TmdbLookup::new(transport, self.tmdb_token.clone())
            .with_language(self.language.clone())
            .include_adult(self.include_adult)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(MovieSearchError::Config(format!(
            "expected a boolean, got {raw:?}"
        ))),
    }
}

fn parse_seconds(raw: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(seconds) if seconds.is_finite() && seconds > 0.0 => Ok(seconds),
        _ => Err(MovieSearchError::Config(format!(
            "expected a positive number of seconds, got {raw:?}"
        ))),
    }
}

/// Resolves the configured theme, falling back to the default.
///
/// `theme_file` wins over `theme_name`; load failures are logged.
#[must_use]
pub fn resolve_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Creates the initial application state: an idle session with an empty
/// search bar, focused for typing.
///
/// ```rust
/// use moviesearch::{initialize, Config, InputMode};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.input_mode, InputMode::Typing);
/// assert!(state.session.current_request().is_none());
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        has_token = config.tmdb_token.is_some(),
        language = ?config.language,
        include_adult = config.include_adult,
        "initializing moviesearch plugin"
    );

    AppState::new(resolve_theme(config), config.toast_seconds)
}
