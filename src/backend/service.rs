//! Collaborator abstraction.
//!
//! This module defines the [`Backend`] trait, the seam behind which the HTTP
//! backend (or a fixture standing in for it) lives. The core never calls it
//! directly: requests are posted as messages and executed by
//! [`BackendWorker`](crate::backend::BackendWorker), which turns every outcome into
//! a response.
//!
//! The trait is minimal and maps one method to one collaborator in the external
//! interface: catalog, favorites, auth and password reset.

use crate::domain::error::Result;
use crate::domain::{AuthFailureReason, CatalogPage, Credentials, Cursor, ListingId};

/// Verdict of the auth collaborator for a well-formed login call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected(AuthFailureReason),
}

/// Abstraction over the site's backend collaborators.
///
/// Returning `Err` means the call itself failed (transport, server fault). A
/// definite "no" from the auth collaborator is `Ok(LoginOutcome::Rejected(_))`.
pub trait Backend {
    /// Returns the page of listings matching `query`, resuming at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be produced for any reason.
    fn fetch_listings(&mut self, query: Option<&str>, cursor: Option<&Cursor>) -> Result<CatalogPage>;

    /// Persists favorite membership of one listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the change was not stored.
    fn set_favorite(&mut self, listing: &ListingId, favorited: bool) -> Result<()>;

    /// Checks credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator could not give a verdict.
    fn login(&mut self, credentials: &Credentials) -> Result<LoginOutcome>;

    /// Requests a password reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request was not acknowledged.
    fn send_reset_link(&mut self, email: &str) -> Result<()>;
}
