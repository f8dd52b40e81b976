//! View model types representing renderable page state.
//!
//! View models are immutable snapshots computed from application state. They
//! contain no business logic, only display-ready data such as card hrefs,
//! highlight ranges and button enablement.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the rendering layer. Every type serializes to JSON so a renderer in any
//! technology can consume it.
//!
//! # Example
//!
//! ```rust
//! use stayview::app::AppState;
//!
//! let vm = AppState::default().compute_viewmodel();
//! assert_eq!(vm.route, "/");
//! assert_eq!(vm.header.tabs[0].label, "Stays");
//! ```

use crate::app::auth::{AuthSession, ResetLinkStatus};
use crate::app::modes::HeaderVariant;
use crate::app::navigation::Tab;
use crate::domain::ListingId;
use serde::Serialize;

/// Complete view model for one page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageViewModel {
    /// Path of the route being shown.
    pub route: String,

    pub header: HeaderViewModel,

    pub catalog: CatalogViewModel,

    /// Login page section, present only on `/login`.
    pub login: Option<LoginViewModel>,

    /// Transient notice (favorite sync failure).
    pub notice: Option<NoticeViewModel>,
}

/// Header display information.
///
/// Both layout variants carry the same data; the variant tells the renderer
/// which one to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderViewModel {
    pub variant: HeaderVariant,
    pub search_bar: SearchBarInfo,
    pub tabs: Vec<NavTabInfo>,
    pub signed_in: bool,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchBarInfo {
    /// Raw text as typed.
    pub query: String,

    /// Whether the submit control is enabled (text is not blank).
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavTabInfo {
    pub tab: Tab,
    pub label: &'static str,
    pub active: bool,
}

/// Listing grid display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogViewModel {
    pub cards: Vec<CardViewModel>,

    /// At least one card is present. Gates UI that depends on the first card.
    pub has_results: bool,

    pub loading: bool,

    /// Shown when a completed load produced no listings.
    pub empty_state: Option<EmptyState>,

    /// Message of the last failed load; existing cards stay visible.
    pub error: Option<&'static str>,

    /// Label of the retry affordance, present together with `error`.
    pub retry_label: Option<&'static str>,

    pub show_more: ShowMoreInfo,
}

/// Display information for a single property card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardViewModel {
    pub id: ListingId,
    pub title: String,
    pub location: String,
    pub price_label: String,

    /// First image, if the listing has any.
    pub image: Option<String>,

    /// Detail page path, `/property/{id}`.
    pub href: String,

    pub is_favorited: bool,

    /// A favorite change for this card is awaiting the collaborator.
    pub favorite_syncing: bool,

    /// Character ranges of the title matched by the active search query.
    ///
    /// Each tuple is `(start_index, end_index)` with an exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The "Continue exploring" control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowMoreInfo {
    /// Hidden once the collaborator reports no further pages.
    pub visible: bool,

    /// Disabled while any catalog load is pending.
    pub enabled: bool,

    pub label: &'static str,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    /// Primary message (e.g., "No stays found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Login page display information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginViewModel {
    pub session: AuthSession,

    /// Failure message for the last rejected submission.
    pub message: Option<&'static str>,

    /// False while a submission is in flight.
    pub submit_enabled: bool,

    /// Present while the password-reset modal is open.
    pub reset_modal: Option<ResetModalViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetModalViewModel {
    pub title: &'static str,
    pub instructions: &'static str,
    pub action_label: &'static str,
    pub status: ResetLinkStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeViewModel {
    pub listing: ListingId,
    pub message: &'static str,
}
