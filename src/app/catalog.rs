//! Property catalog state and pagination.
//!
//! [`PropertyCatalog`] owns the ordered listings shown on the home page together
//! with the pagination cursor and load status. At most one catalog request is in
//! flight at a time: a `load_more` while a load is pending is coalesced into it,
//! and a new `load_initial` supersedes whatever was pending, turning its response
//! stale.
//!
//! # Merge Rules
//!
//! 1. An initial page replaces the catalog.
//! 2. A follow-up page is appended after the existing listings, in the order received.
//! 3. A listing whose id is already present is dropped; the existing entry wins.
//! 4. A failed load changes nothing but the status.

use crate::backend::{BackendRequest, RequestCounter, RequestId};
use crate::domain::{CatalogPage, Cursor, ListingId, PropertyListing};
use serde::Serialize;
use std::collections::HashSet;

/// Which kind of load a request or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadKind {
    Initial,
    More,
}

/// A recorded catalog load failure. The catalog contents are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub kind: LoadKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading { kind: LoadKind },
    Failed(LoadFailure),
}

/// A catalog request ready to be posted to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFetch {
    pub id: RequestId,
    pub query: Option<String>,
    pub cursor: Option<Cursor>,
}

impl From<CatalogFetch> for BackendRequest {
    fn from(fetch: CatalogFetch) -> Self {
        Self::FetchListings {
            id: fetch.id,
            query: fetch.query,
            cursor: fetch.cursor,
        }
    }
}

/// Result of asking for more listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMore {
    /// A new request must be posted.
    Issued(CatalogFetch),
    /// A load is already pending; the call joined it.
    Coalesced(RequestId),
    /// The collaborator reported no further pages.
    Exhausted,
}

/// What an applied page changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MergeSummary {
    pub appended: usize,
    pub dropped: usize,
    /// Ids of appended listings the collaborator reports as favorited.
    pub favorited: Vec<ListingId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    id: RequestId,
    kind: LoadKind,
    /// Query of an initial load. Becomes the catalog query only once its page lands.
    query: Option<String>,
}

/// Listings currently loaded, plus pagination and load status.
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    listings: Vec<PropertyListing>,
    ids: HashSet<ListingId>,
    query: Option<String>,
    next_cursor: Option<Cursor>,
    has_more: bool,
    status: LoadStatus,
    pending: Option<Pending>,
    /// Query of the last failed initial load, re-sent by `retry`.
    failed_query: Option<String>,
    loaded: bool,
}

impl PropertyCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the first page for `query`.
    ///
    /// Listings, cursor and the current query stay in place until the page
    /// arrives. A pending request, of either kind, is superseded and its response
    /// will be ignored.
    pub fn load_initial(&mut self, requests: &mut RequestCounter, query: Option<String>) -> CatalogFetch {
        let id = requests.next_id();

        if let Some(previous) = &self.pending {
            tracing::debug!(superseded = %previous.id, request_id = %id, "pending catalog load superseded");
        }

        tracing::debug!(request_id = %id, query = ?query, "initial catalog load requested");

        self.pending = Some(Pending {
            id,
            kind: LoadKind::Initial,
            query: query.clone(),
        });
        self.status = LoadStatus::Loading { kind: LoadKind::Initial };

        CatalogFetch { id, query, cursor: None }
    }

    /// Requests the next page, honouring the single-flight rule.
    ///
    /// The page continues the result set currently shown. After a failed search
    /// that is still the previous query with its own cursor.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stayview::app::catalog::{LoadMore, PropertyCatalog};
    /// use stayview::backend::RequestCounter;
    ///
    /// let mut requests = RequestCounter::default();
    /// let mut catalog = PropertyCatalog::new();
    /// let first = catalog.load_initial(&mut requests, None);
    ///
    /// assert_eq!(catalog.load_more(&mut requests), LoadMore::Coalesced(first.id));
    /// ```
    pub fn load_more(&mut self, requests: &mut RequestCounter) -> LoadMore {
        if let Some(pending) = &self.pending {
            tracing::debug!(request_id = %pending.id, "load more coalesced into pending load");
            return LoadMore::Coalesced(pending.id);
        }

        if !self.has_more {
            tracing::debug!("load more ignored, catalog exhausted");
            return LoadMore::Exhausted;
        }

        let id = requests.next_id();
        self.pending = Some(Pending {
            id,
            kind: LoadKind::More,
            query: None,
        });
        self.status = LoadStatus::Loading { kind: LoadKind::More };

        tracing::debug!(request_id = %id, cursor = ?self.next_cursor, "next catalog page requested");

        LoadMore::Issued(CatalogFetch {
            id,
            query: self.query.clone(),
            cursor: self.next_cursor.clone(),
        })
    }

    /// Re-issues the load that failed last. `None` when nothing failed.
    pub fn retry(&mut self, requests: &mut RequestCounter) -> Option<CatalogFetch> {
        let kind = match &self.status {
            LoadStatus::Failed(failure) => failure.kind,
            LoadStatus::Idle | LoadStatus::Loading { .. } => return None,
        };

        match kind {
            LoadKind::Initial => {
                let query = self.failed_query.take();
                Some(self.load_initial(requests, query))
            }
            LoadKind::More => match self.load_more(requests) {
                LoadMore::Issued(fetch) => Some(fetch),
                LoadMore::Coalesced(_) | LoadMore::Exhausted => None,
            },
        }
    }

    fn take_pending(&mut self, id: RequestId) -> Option<Pending> {
        if self.pending.as_ref().is_some_and(|pending| pending.id == id) {
            return self.pending.take();
        }
        tracing::debug!(request_id = %id, pending = ?self.pending, "stale catalog response dropped");
        None
    }

    /// Applies a page answering request `id`. Returns `None` for stale responses.
    pub fn apply_page(&mut self, id: RequestId, page: CatalogPage) -> Option<MergeSummary> {
        let Pending { kind, query, .. } = self.take_pending(id)?;

        if kind == LoadKind::Initial {
            self.listings.clear();
            self.ids.clear();
            self.query = query;
            self.failed_query = None;
        }

        let mut summary = MergeSummary::default();
        for listing in page.listings {
            if self.ids.insert(listing.id.clone()) {
                if listing.is_favorited {
                    summary.favorited.push(listing.id.clone());
                }
                self.listings.push(listing);
                summary.appended += 1;
            } else {
                summary.dropped += 1;
            }
        }

        self.has_more = page.has_more && page.next_cursor.is_some();
        if page.has_more && page.next_cursor.is_none() {
            tracing::warn!(request_id = %id, "page reported more results without a cursor");
        }
        self.next_cursor = page.next_cursor;
        self.status = LoadStatus::Idle;
        self.loaded = true;

        tracing::debug!(
            request_id = %id,
            kind = ?kind,
            appended = summary.appended,
            dropped = summary.dropped,
            total = self.listings.len(),
            has_more = self.has_more,
            "catalog page merged"
        );

        Some(summary)
    }

    /// Records a failure for request `id`. Returns `false` for stale responses.
    pub fn apply_failure(&mut self, id: RequestId, reason: impl Into<String>) -> bool {
        let Some(Pending { kind, query, .. }) = self.take_pending(id) else {
            return false;
        };

        if kind == LoadKind::Initial {
            self.failed_query = query;
        }

        let reason = reason.into();
        tracing::warn!(request_id = %id, kind = ?kind, reason = %reason, "catalog load failed");
        self.status = LoadStatus::Failed(LoadFailure { kind, reason });
        true
    }

    #[must_use]
    pub fn listings(&self) -> &[PropertyListing] {
        &self.listings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    #[must_use]
    pub fn has_at_least_one(&self) -> bool {
        !self.listings.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ListingId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a `load_more` would issue a new request right now.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.has_more && self.pending.is_none()
    }

    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending.as_ref().map(|pending| pending.id)
    }

    /// Whether at least one page has been applied.
    #[must_use]
    pub const fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// Query of the result set being shown.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}
