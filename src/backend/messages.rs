//! Request/response protocol between the core and its collaborators.
//!
//! Every suspension point of the core is a [`BackendRequest`] posted through
//! [`Action::PostToBackend`](crate::app::Action::PostToBackend) and later answered
//! by exactly one [`BackendResponse`] carrying the same [`RequestId`]. Controllers
//! remember the id they wait for, so a response for a superseded request is
//! recognised as stale and dropped.

use crate::domain::{AuthFailureReason, CatalogPage, Credentials, Cursor, ListingId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`RequestId`]s.
///
/// Ids are never reused within a session, so ordering by id is issue order.
#[derive(Debug, Clone, Default)]
pub struct RequestCounter {
    last: u64,
}

impl RequestCounter {
    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

/// Requests sent from the core to a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendRequest {
    /// Fetch a page of listings. No cursor means the first page.
    FetchListings {
        id: RequestId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cursor: Option<Cursor>,
    },

    /// Mirror a local favorite flip.
    SetFavorite {
        id: RequestId,
        listing: ListingId,
        favorited: bool,
    },

    /// Check credentials.
    Login { id: RequestId, credentials: Credentials },

    /// Ask for a password reset email.
    SendResetLink { id: RequestId, email: String },
}

impl BackendRequest {
    #[must_use]
    pub const fn id(&self) -> RequestId {
        match self {
            Self::FetchListings { id, .. }
            | Self::SetFavorite { id, .. }
            | Self::Login { id, .. }
            | Self::SendResetLink { id, .. } => *id,
        }
    }

    /// Short operation name used in log fields.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::FetchListings { .. } => "fetch listings",
            Self::SetFavorite { .. } => "set favorite",
            Self::Login { .. } => "login",
            Self::SendResetLink { .. } => "send reset link",
        }
    }
}

/// Responses sent from a collaborator back to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendResponse {
    ListingsLoaded { id: RequestId, page: CatalogPage },

    /// Any non-success of the catalog collaborator. The reason is opaque.
    ListingsFailed { id: RequestId, reason: String },

    FavoriteSaved {
        id: RequestId,
        listing: ListingId,
        favorited: bool,
    },

    FavoriteFailed {
        id: RequestId,
        listing: ListingId,
        favorited: bool,
        reason: String,
    },

    LoginSucceeded { id: RequestId },

    LoginFailed { id: RequestId, reason: AuthFailureReason },

    ResetLinkAcknowledged { id: RequestId, email: String },

    ResetLinkFailed { id: RequestId, reason: String },
}

impl BackendResponse {
    #[must_use]
    pub const fn id(&self) -> RequestId {
        match self {
            Self::ListingsLoaded { id, .. }
            | Self::ListingsFailed { id, .. }
            | Self::FavoriteSaved { id, .. }
            | Self::FavoriteFailed { id, .. }
            | Self::LoginSucceeded { id }
            | Self::LoginFailed { id, .. }
            | Self::ResetLinkAcknowledged { id, .. }
            | Self::ResetLinkFailed { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_strictly_increasing() {
        let mut counter = RequestCounter::default();
        let first = counter.next_id();
        let second = counter.next_id();
        assert!(second > first);
        assert_eq!(first, RequestId(1));
    }

    #[test]
    fn fetch_request_omits_absent_fields() {
        let request = BackendRequest::FetchListings {
            id: RequestId(3),
            query: None,
            cursor: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"fetch_listings","id":3}"#);
    }

    #[test]
    fn login_failure_carries_wire_reason() {
        let json = r#"{"type":"login_failed","id":9,"reason":"network_error"}"#;
        let response: BackendResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response,
            BackendResponse::LoginFailed {
                id: RequestId(9),
                reason: AuthFailureReason::NetworkError,
            }
        );
        assert_eq!(response.id(), RequestId(9));
    }
}
