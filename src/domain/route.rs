//! Route strings exchanged with the router.
//!
//! The router is an external collaborator. The core produces [`Route`] values from
//! navigation events and reads the current route back to decide, for example,
//! whether a failed-login message is still visible.

use crate::domain::error::{Result, StayviewError};
use crate::domain::listing::ListingId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login";

/// Known destinations of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Route {
    /// `/`: the home page with search and the stays catalog.
    Home,
    /// `/property/{id}`
    Property(ListingId),
    /// `/tours`: the experiences tab.
    Tours,
    /// `/signup`
    Signup,
    /// `/login`
    Login,
    /// Any other absolute path the router reports.
    Other(String),
}

impl Route {
    /// Parses an absolute path reported by the router.
    ///
    /// Query strings and fragments are ignored; a trailing slash is tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`StayviewError::InvalidRoute`] when the path is not absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use stayview::domain::{ListingId, Route};
    ///
    /// assert_eq!(Route::parse("/property/7").unwrap(), Route::Property(ListingId::new("7")));
    /// assert_eq!(Route::parse("/login?next=/").unwrap(), Route::Login);
    /// assert!(Route::parse("login").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if !path.starts_with('/') {
            return Err(StayviewError::InvalidRoute(path.to_string()));
        }

        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or(path);
        let trimmed = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        let route = match trimmed {
            "" | "/" => Self::Home,
            "/tours" => Self::Tours,
            "/signup" => Self::Signup,
            LOGIN_PATH => Self::Login,
            other => match other.strip_prefix("/property/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Property(ListingId::new(id)),
                _ => Self::Other(other.to_string()),
            },
        };

        Ok(route)
    }

    /// Renders the route as the path string the router consumes.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Property(id) => format!("/property/{id}"),
            Self::Tours => "/tours".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Other(path) => path.clone(),
        }
    }

    #[must_use]
    pub const fn is_login(&self) -> bool {
        matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path()
    }
}

impl TryFrom<String> for Route {
    type Error = StayviewError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}
