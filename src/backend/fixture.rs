//! In-memory collaborator backed by a JSON fixture.
//!
//! Stands in for the HTTP backend in the replay binary and in tests. Listings are
//! filtered by a case-insensitive substring match on title and location and paged
//! with an offset cursor.
//!
//! # File Format
//!
//! ```json
//! {
//!   "page_size": 8,
//!   "listings": [
//!     { "id": "1", "title": "Cabin by the lake", "location": "Da Lat", "price_label": "$80 / night" }
//!   ],
//!   "accounts": [
//!     { "email": "guest@example.com", "password": "secret" }
//!   ]
//! }
//! ```

use crate::backend::service::{Backend, LoginOutcome};
use crate::domain::error::{Result, StayviewError};
use crate::domain::{AuthFailureReason, CatalogPage, Credentials, Cursor, ListingId, PropertyListing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

const DEFAULT_PAGE_SIZE: usize = 8;

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// An account the fixture accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureAccount {
    pub email: String,
    pub password: String,
}

/// Top-level fixture document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FixtureData {
    #[serde(default = "default_page_size")]
    page_size: usize,

    #[serde(default)]
    listings: Vec<PropertyListing>,

    #[serde(default)]
    accounts: Vec<FixtureAccount>,
}

/// Fixture-driven [`Backend`].
#[derive(Debug, Clone)]
pub struct FixtureBackend {
    data: FixtureData,
    favorites: BTreeSet<ListingId>,
    reset_requests: Vec<String>,
    unreachable: bool,
    reject_favorites: bool,
}

impl FixtureBackend {
    /// Creates a fixture from listings and accounts with the default page size.
    #[must_use]
    pub fn new(listings: Vec<PropertyListing>, accounts: Vec<FixtureAccount>) -> Self {
        Self::from_data(FixtureData {
            page_size: DEFAULT_PAGE_SIZE,
            listings,
            accounts,
        })
    }

    fn from_data(data: FixtureData) -> Self {
        let favorites = data
            .listings
            .iter()
            .filter(|listing| listing.is_favorited)
            .map(|listing| listing.id.clone())
            .collect();

        Self {
            data,
            favorites,
            reset_requests: Vec::new(),
            unreachable: false,
            reject_favorites: false,
        }
    }

    /// Parses a fixture document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or `page_size` is zero.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: FixtureData = serde_json::from_str(json)?;
        if data.page_size == 0 {
            return Err(StayviewError::Config("fixture page_size must be at least 1".to_string()));
        }

        tracing::debug!(
            listing_count = data.listings.len(),
            account_count = data.accounts.len(),
            page_size = data.page_size,
            "fixture loaded"
        );

        Ok(Self::from_data(data))
    }

    /// Loads a fixture document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "reading fixture file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.data.page_size = page_size.max(1);
        self
    }

    /// Makes every call fail as if the server could not be reached.
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    /// Makes favorite writes fail while other calls keep working.
    pub fn set_reject_favorites(&mut self, reject: bool) {
        self.reject_favorites = reject;
    }

    /// Stored favorite membership.
    #[must_use]
    pub fn is_favorite(&self, listing: &ListingId) -> bool {
        self.favorites.contains(listing)
    }

    /// Emails for which a reset link was requested, in request order.
    #[must_use]
    pub fn reset_requests(&self) -> &[String] {
        &self.reset_requests
    }

    fn ensure_reachable(&self) -> Result<()> {
        if self.unreachable {
            Err(StayviewError::Unreachable)
        } else {
            Ok(())
        }
    }

    fn matches(listing: &PropertyListing, needle: &str) -> bool {
        listing.title.to_lowercase().contains(needle) || listing.location.to_lowercase().contains(needle)
    }
}

impl Backend for FixtureBackend {
    fn fetch_listings(&mut self, query: Option<&str>, cursor: Option<&Cursor>) -> Result<CatalogPage> {
        self.ensure_reachable()?;

        let offset = match cursor {
            Some(Cursor(token)) => token
                .parse::<usize>()
                .map_err(|_| StayviewError::Backend(format!("malformed cursor: {token}")))?,
            None => 0,
        };

        let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
        let matching: Vec<&PropertyListing> = self
            .data
            .listings
            .iter()
            .filter(|listing| needle.as_deref().map_or(true, |n| Self::matches(listing, n)))
            .collect();

        let end = (offset + self.data.page_size).min(matching.len());
        let listings: Vec<PropertyListing> = matching
            .get(offset..end)
            .unwrap_or_default()
            .iter()
            .map(|listing| PropertyListing {
                is_favorited: self.favorites.contains(&listing.id),
                ..(*listing).clone()
            })
            .collect();

        let has_more = end < matching.len();
        Ok(CatalogPage {
            listings,
            next_cursor: has_more.then(|| Cursor(end.to_string())),
            has_more,
        })
    }

    fn set_favorite(&mut self, listing: &ListingId, favorited: bool) -> Result<()> {
        self.ensure_reachable()?;
        if self.reject_favorites {
            return Err(StayviewError::Backend("favorites are temporarily unavailable".to_string()));
        }

        if favorited {
            self.favorites.insert(listing.clone());
        } else {
            self.favorites.remove(listing);
        }
        Ok(())
    }

    fn login(&mut self, credentials: &Credentials) -> Result<LoginOutcome> {
        self.ensure_reachable()?;

        let email = credentials.email.trim();
        let outcome = match self
            .data
            .accounts
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email))
        {
            None => LoginOutcome::Rejected(AuthFailureReason::UnknownUser),
            Some(account) if account.password == credentials.password => LoginOutcome::Accepted,
            Some(_) => LoginOutcome::Rejected(AuthFailureReason::InvalidCredentials),
        };
        Ok(outcome)
    }

    fn send_reset_link(&mut self, email: &str) -> Result<()> {
        self.ensure_reachable()?;
        self.reset_requests.push(email.trim().to_string());
        Ok(())
    }
}
