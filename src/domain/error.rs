//! Error types for the stayview interaction core.
//!
//! This module defines the centralized error type [`StayviewError`] and a type alias
//! [`Result`] used throughout the crate. Errors here describe faults at the edges
//! (configuration, fixture files, collaborator transport). Recoverable UI outcomes
//! such as a failed page load or a rejected login are not errors; controllers record
//! them as status fields.

use thiserror::Error;

/// The main error type for stayview operations.
///
/// # Examples
///
/// ```
/// use stayview::StayviewError;
///
/// fn validate() -> Result<(), StayviewError> {
///     Err(StayviewError::Config("notice_ttl_secs must be positive".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum StayviewError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fixture file, event line or message payload was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML configuration file could not be parsed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The collaborator answered but refused the request.
    ///
    /// The string is the opaque reason reported by the collaborator.
    #[error("Backend error: {0}")]
    Backend(String),

    /// The collaborator could not be reached at all.
    #[error("Backend unreachable")]
    Unreachable,

    /// A router-reported path could not be interpreted.
    #[error("Invalid route: {0}")]
    InvalidRoute(String),
}

/// A specialized `Result` type for stayview operations.
pub type Result<T> = std::result::Result<T, StayviewError>;
