//! Stayview: the client-side interaction core of a stay-booking site.
//!
//! Stayview owns the state behind the site's pages and leaves drawing to a
//! separate rendering layer:
//! - A search box that emits trimmed queries and drives the listing grid
//! - A paginated property catalog with single-flight "Continue exploring"
//! - Favorite toggling that never navigates, optionally mirrored to a collaborator
//! - Navigation from header tabs, logo, cards and links
//! - A login flow with a password-reset modal
//! - A header view model with two layout variants

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Replay Shim (main.rs) / Session (runtime.rs)       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Controllers
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                        │
//! ┌───────────────┐                       ┌───────────────┐
//! │ UI Layer      │                       │ Backend Layer │
//! │ (ui/)         │                       │ (backend/)    │
//! │ - View models │                       │ - Messages    │
//! │               │                       │ - Fixture     │
//! └───────────────┘                       └───────────────┘
//!         │                                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Listings, routes, credentials                    │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`backend`]: Collaborator request/response messages and the fixture backend
//! - [`domain`]: Core domain types (listings, routes, credentials, errors)
//! - [`runtime`]: Single-threaded session driving state and backend together
//! - [`ui`]: View models for the rendering layer
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration is a small TOML file; every key is optional:
//!
//! ```toml
//! post_login_route = "/"
//! sync_favorites = true
//! notice_ttl_secs = 5
//! trace_level = "debug"
//! log_file = "/tmp/stayview.log"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use stayview::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::CatalogRequested)?;
//!
//! for action in actions {
//!     match action {
//!         Action::PostToBackend(request) => println!("post {}", request.operation()),
//!         Action::Navigate(route) => println!("go to {route}"),
//!     }
//! }
//! # Ok::<(), stayview::StayviewError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Request Ids Instead of Futures
//!
//! Every collaborator call is a message tagged with a monotonic request id. The
//! owning controller remembers the id it is waiting for and drops any response
//! that does not match. Superseded loads and responses for an abandoned login
//! page are therefore ignored without cancellation plumbing.
//!
//! ## Immutable View Models
//!
//! Rendering reads computed view models, never the controllers, so the rendering
//! layer cannot mutate state outside the event handler.

pub mod app;
pub mod backend;
pub mod domain;
pub mod runtime;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Settings};
pub use domain::{Result, Route, StayviewError};
pub use runtime::Session;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Runtime configuration.
///
/// # Example
///
/// ```rust
/// use stayview::Config;
///
/// let config = Config::from_toml_str("sync_favorites = false\nnotice_ttl_secs = 3")?;
/// assert!(!config.sync_favorites);
/// assert_eq!(config.post_login_route, "/");
/// # Ok::<(), stayview::StayviewError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Route shown after a successful login. Must not be `/login`. Default: `"/"`
    pub post_login_route: String,

    /// Mirror favorite toggles to the collaborator. Default: `true`
    pub sync_favorites: bool,

    /// Seconds a favorite sync failure notice stays up. Default: `5`
    pub notice_ttl_secs: i64,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or a full `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Write logs to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            post_login_route: "/".to_string(),
            sync_favorites: true,
            notice_ttl_secs: 5,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// Lenient: unparsable values fall back to their defaults and unknown keys are
    /// ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use stayview::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("sync_favorites".to_string(), "false".to_string());
    /// map.insert("notice_ttl_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert!(!config.sync_favorites);
    /// assert_eq!(config.notice_ttl_secs, 5);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let sync_favorites = config
            .get("sync_favorites")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.sync_favorites);

        let notice_ttl_secs = config
            .get("notice_ttl_secs")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|ttl| *ttl >= 0)
            .unwrap_or(defaults.notice_ttl_secs);

        Self {
            post_login_route: config
                .get("post_login_route")
                .cloned()
                .unwrap_or(defaults.post_login_route),
            sync_favorites,
            notice_ttl_secs,
            trace_level: config.get("trace_level").cloned(),
            log_file: config.get("log_file").map(PathBuf::from),
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`StayviewError::Toml`] for malformed TOML or unknown keys and
    /// [`StayviewError::Config`] when a value fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.settings()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`StayviewError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolves the behaviour settings.
    ///
    /// # Errors
    ///
    /// Returns [`StayviewError::Config`] when `post_login_route` is not an
    /// absolute path or points at `/login`, or when `notice_ttl_secs` is negative.
    pub fn settings(&self) -> Result<Settings> {
        let post_login_route = Route::parse(&self.post_login_route)
            .map_err(|e| StayviewError::Config(format!("post_login_route: {e}")))?;

        if post_login_route.is_login() {
            return Err(StayviewError::Config(
                "post_login_route must not be the login page".to_string(),
            ));
        }

        if self.notice_ttl_secs < 0 {
            return Err(StayviewError::Config(format!(
                "notice_ttl_secs must not be negative, got {}",
                self.notice_ttl_secs
            )));
        }

        Ok(Settings {
            post_login_route,
            sync_favorites: self.sync_favorites,
            notice_ttl_secs: self.notice_ttl_secs,
        })
    }
}

/// Creates the application state for a fresh page load.
///
/// Invalid settings are logged and replaced with defaults.
///
/// # Example
///
/// ```rust
/// use stayview::{initialize, Config, Route};
///
/// let state = initialize(&Config::default());
/// assert_eq!(state.route(), &Route::Home);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing stayview");

    let settings = config.settings().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid configuration, using defaults");
        Settings::default()
    });

    AppState::new(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let settings = Config::default().settings().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn toml_overrides() {
        let config = Config::from_toml_str(
            r#"
            post_login_route = "/tours"
            sync_favorites = false
            trace_level = "debug"
            "#,
        )
        .unwrap();

        let settings = config.settings().unwrap();
        assert_eq!(settings.post_login_route, Route::Tours);
        assert!(!settings.sync_favorites);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.notice_ttl_secs, 5);
    }

    #[test]
    fn rejects_login_as_destination() {
        let err = Config::from_toml_str(r#"post_login_route = "/login""#).unwrap_err();
        assert!(matches!(err, StayviewError::Config(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::from_toml_str("theme = \"dark\"").unwrap_err();
        assert!(matches!(err, StayviewError::Toml(_)));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "notice_ttl_secs = 9").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.notice_ttl_secs, 9);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, StayviewError::Io(_)));
    }

    #[test]
    fn initialize_falls_back_on_invalid_settings() {
        let config = Config {
            post_login_route: "relative".to_string(),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.settings(), &Settings::default());
    }
}
