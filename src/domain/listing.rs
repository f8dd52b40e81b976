//! Property listing domain model.
//!
//! Listings are owned by the catalog as an ordered sequence; display order is the
//! order in which pages arrived. Only favorite membership is managed by the core,
//! every other field is opaque display data handed through to the view models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identity of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl ListingId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Opaque token telling the collaborator where the next page resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(pub String);

/// A single stay shown as a card in the catalog.
///
/// `is_favorited` is the collaborator's view at load time. After a listing has been
/// merged into the catalog the favorite set is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: ListingId,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price_label: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_favorited: bool,
}

impl PropertyListing {
    /// Creates a listing with only identity and title set.
    ///
    /// # Examples
    ///
    /// ```
    /// use stayview::domain::PropertyListing;
    ///
    /// let listing = PropertyListing::new("42", "Cabin by the lake");
    /// assert_eq!(listing.id.as_str(), "42");
    /// assert!(!listing.is_favorited);
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ListingId::new(id),
            title: title.into(),
            location: String::new(),
            price_label: String::new(),
            images: Vec::new(),
            is_favorited: false,
        }
    }

    /// First image reference, used as the card thumbnail.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// One batch of listings returned by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub listings: Vec<PropertyListing>,
    #[serde(default)]
    pub next_cursor: Option<Cursor>,
    pub has_more: bool,
}

impl CatalogPage {
    /// A final page with no continuation.
    #[must_use]
    pub fn last(listings: Vec<PropertyListing>) -> Self {
        Self {
            listings,
            next_cursor: None,
            has_more: false,
        }
    }
}
