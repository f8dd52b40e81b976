//! Favorite membership and the toggle controller.
//!
//! A toggle flips membership locally and synchronously. When syncing is enabled the
//! flip is then mirrored to the favorites collaborator; if the latest sync for a
//! listing fails, the listing reverts to the membership the collaborator last
//! confirmed and a non-blocking notice is raised. Toggling never navigates and
//! never touches the catalog.

use crate::backend::{BackendRequest, RequestCounter, RequestId};
use crate::domain::ListingId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Ids of listings the user has favorited in this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    members: HashSet<ListingId>,
}

impl FavoriteSet {
    #[must_use]
    pub fn contains(&self, listing: &ListingId) -> bool {
        self.members.contains(listing)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListingId> {
        self.members.iter()
    }

    fn set(&mut self, listing: &ListingId, favorited: bool) {
        if favorited {
            self.members.insert(listing.clone());
        } else {
            self.members.remove(listing);
        }
    }
}

/// Transient notice raised when a favorite could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteSyncFailure {
    pub listing: ListingId,
    pub reason: String,
    /// Whether the local flip was undone.
    pub reverted: bool,
    /// Unix timestamp (seconds) at which the notice was raised.
    pub raised_at: i64,
}

impl FavoriteSyncFailure {
    #[must_use]
    pub const fn message(&self) -> &'static str {
        if self.reverted {
            "Couldn't save your favorite. It has been restored."
        } else {
            "Couldn't save an earlier favorite change."
        }
    }
}

/// Outcome of a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub listing: ListingId,
    /// Membership after the flip.
    pub favorited: bool,
    /// Request mirroring the flip, when syncing is enabled.
    pub sync: Option<RequestId>,
}

impl FavoriteToggle {
    /// The collaborator request for this toggle, if any.
    #[must_use]
    pub fn request(&self) -> Option<BackendRequest> {
        self.sync.map(|id| BackendRequest::SetFavorite {
            id,
            listing: self.listing.clone(),
            favorited: self.favorited,
        })
    }
}

/// Owns the [`FavoriteSet`]; all mutation goes through its methods.
#[derive(Debug, Clone, Default)]
pub struct FavoriteToggleController {
    favorites: FavoriteSet,
    /// Membership the collaborator has acknowledged.
    confirmed: HashSet<ListingId>,
    /// Latest unanswered sync per listing.
    pending: HashMap<ListingId, RequestId>,
    /// Listings the user flipped in this session.
    touched: HashSet<ListingId>,
    sync: bool,
    notice: Option<FavoriteSyncFailure>,
}

impl FavoriteToggleController {
    #[must_use]
    pub fn new(sync: bool) -> Self {
        Self {
            sync,
            ..Self::default()
        }
    }

    /// Flips membership of `listing`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stayview::app::favorites::FavoriteToggleController;
    /// use stayview::backend::RequestCounter;
    /// use stayview::domain::ListingId;
    ///
    /// let mut requests = RequestCounter::default();
    /// let mut favorites = FavoriteToggleController::new(false);
    /// let id = ListingId::new("7");
    ///
    /// assert!(favorites.toggle(&id, &mut requests).favorited);
    /// assert!(!favorites.toggle(&id, &mut requests).favorited);
    /// assert!(favorites.favorites().is_empty());
    /// ```
    pub fn toggle(&mut self, listing: &ListingId, requests: &mut RequestCounter) -> FavoriteToggle {
        let favorited = !self.favorites.contains(listing);
        self.favorites.set(listing, favorited);
        self.touched.insert(listing.clone());

        let sync = self.sync.then(|| {
            let id = requests.next_id();
            self.pending.insert(listing.clone(), id);
            id
        });

        tracing::debug!(listing = %listing, favorited = favorited, sync = ?sync, "favorite toggled");

        FavoriteToggle {
            listing: listing.clone(),
            favorited,
            sync,
        }
    }

    /// Adopts collaborator-reported favorites for listings the user has not flipped.
    pub fn seed(&mut self, listings: impl IntoIterator<Item = ListingId>) {
        for listing in listings {
            if self.touched.contains(&listing) {
                continue;
            }
            self.favorites.set(&listing, true);
            self.confirmed.insert(listing);
        }
    }

    /// Records an acknowledged sync.
    pub fn apply_saved(&mut self, id: RequestId, listing: &ListingId, favorited: bool) {
        if favorited {
            self.confirmed.insert(listing.clone());
        } else {
            self.confirmed.remove(listing);
        }

        if self.pending.get(listing) == Some(&id) {
            self.pending.remove(listing);
        }

        tracing::debug!(request_id = %id, listing = %listing, favorited = favorited, "favorite saved");
    }

    /// Records a failed sync and raises the notice.
    ///
    /// Only the latest sync for a listing may revert it; an older failure leaves the
    /// newer local flip in place. Returns whether membership was reverted.
    pub fn apply_failed(&mut self, id: RequestId, listing: &ListingId, reason: impl Into<String>, now: i64) -> bool {
        let reverted = if self.pending.get(listing) == Some(&id) {
            self.pending.remove(listing);
            let confirmed = self.confirmed.contains(listing);
            self.favorites.set(listing, confirmed);
            true
        } else {
            false
        };

        let reason = reason.into();
        tracing::warn!(
            request_id = %id,
            listing = %listing,
            reverted = reverted,
            reason = %reason,
            "favorite sync failed"
        );

        self.notice = Some(FavoriteSyncFailure {
            listing: listing.clone(),
            reason,
            reverted,
            raised_at: now,
        });

        reverted
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    #[must_use]
    pub fn is_favorited(&self, listing: &ListingId) -> bool {
        self.favorites.contains(listing)
    }

    #[must_use]
    pub fn is_syncing(&self, listing: &ListingId) -> bool {
        self.pending.contains_key(listing)
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&FavoriteSyncFailure> {
        self.notice.as_ref()
    }

    /// Clears the notice. Returns whether one was showing.
    pub fn dismiss_notice(&mut self) -> bool {
        self.notice.take().is_some()
    }

    /// Clears the notice once it is `ttl_secs` old.
    pub fn expire_notice(&mut self, now: i64, ttl_secs: i64) -> bool {
        match &self.notice {
            Some(notice) if now - notice.raised_at >= ttl_secs => {
                self.notice = None;
                true
            }
            _ => false,
        }
    }
}
