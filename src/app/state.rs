//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the container that owns one instance of each
//! controller plus the current route. It is the single source of truth for the
//! page; the rendering layer reads it only through [`AppState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Search**: the header's [`SearchQueryModel`]
//! - **Catalog**: loaded listings and pagination ([`PropertyCatalog`])
//! - **Favorites**: membership and sync bookkeeping ([`FavoriteToggleController`])
//! - **Auth**: the login page's [`AuthFlow`], remounted on every visit to `/login`
//! - **Route**: what the router is currently showing
//! - **Requests**: the shared [`RequestCounter`] all controllers draw ids from
//!
//! Fields are crate-private. The event handler mutates them through the
//! controllers' own methods; everything else uses the read accessors.
//!
//! # Example
//!
//! ```rust
//! use stayview::app::AppState;
//! use stayview::domain::Route;
//!
//! let state = AppState::default();
//! assert_eq!(state.route(), &Route::Home);
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.catalog.cards.is_empty());
//! ```

use super::auth::AuthFlow;
use super::catalog::{LoadKind, LoadStatus, PropertyCatalog};
use super::favorites::FavoriteToggleController;
use super::modes::HeaderVariant;
use super::navigation::NavigationController;
use super::search::SearchQueryModel;
use crate::app::auth::ModalState;
use crate::backend::RequestCounter;
use crate::domain::{PropertyListing, Route};
use crate::ui::viewmodel::{
    CardViewModel, CatalogViewModel, EmptyState, HeaderViewModel, LoginViewModel, NavTabInfo, NoticeViewModel,
    PageViewModel, ResetModalViewModel, SearchBarInfo, ShowMoreInfo,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Behaviour knobs resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where a successful login lands. Never `/login`.
    pub post_login_route: Route,

    /// Whether favorite toggles are mirrored to the collaborator.
    pub sync_favorites: bool,

    /// Seconds a favorite sync failure notice stays visible.
    pub notice_ttl_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            post_login_route: Route::Home,
            sync_favorites: true,
            notice_ttl_secs: 5,
        }
    }
}

/// Central application state container.
///
/// Mutated by [`handle_event`](crate::app::handle_event) in response to user
/// input, router changes and collaborator responses.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) search: SearchQueryModel,
    pub(crate) catalog: PropertyCatalog,
    pub(crate) favorites: FavoriteToggleController,

    /// The login page's flow. Unmounted whenever the route is not `/login`.
    pub(crate) auth: AuthFlow,

    pub(crate) route: Route,

    /// Set once a login succeeds. Nothing in this state machine signs out.
    pub(crate) signed_in: bool,

    pub(crate) requests: RequestCounter,
    pub(crate) settings: Settings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    /// Creates the state for a fresh page load on `/`.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let mut auth = AuthFlow::new();
        auth.unmount();

        Self {
            search: SearchQueryModel::new(),
            catalog: PropertyCatalog::new(),
            favorites: FavoriteToggleController::new(settings.sync_favorites),
            auth,
            route: Route::Home,
            signed_in: false,
            requests: RequestCounter::default(),
            settings,
        }
    }

    /// Switches to `route`, mounting or unmounting the login flow as needed.
    ///
    /// Leaving `/login` unmounts the current flow so late responses are ignored.
    /// Entering `/login` mounts a fresh flow. Returns whether the route changed.
    pub fn enter_route(&mut self, route: Route) -> bool {
        if route == self.route {
            return false;
        }

        let _span = tracing::debug_span!("enter_route", from = %self.route, to = %route).entered();

        if self.route.is_login() {
            self.auth.unmount();
            tracing::debug!("login flow unmounted");
        }

        if route.is_login() {
            self.auth = AuthFlow::new();
            tracing::debug!("login flow mounted");
        }

        self.route = route;
        true
    }

    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub const fn search(&self) -> &SearchQueryModel {
        &self.search
    }

    #[must_use]
    pub const fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoriteToggleController {
        &self.favorites
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthFlow {
        &self.auth
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Computes a renderable page view model from current state.
    ///
    /// The login section is present only while the route is `/login`.
    #[must_use]
    pub fn compute_viewmodel(&self) -> PageViewModel {
        PageViewModel {
            route: self.route.path(),
            header: self.compute_header(),
            catalog: self.compute_catalog(),
            login: self.route.is_login().then(|| self.compute_login()),
            notice: self.favorites.notice().map(|notice| NoticeViewModel {
                listing: notice.listing.clone(),
                message: notice.message(),
            }),
        }
    }

    fn compute_header(&self) -> HeaderViewModel {
        let tabs = NavigationController::tabs(&self.route)
            .into_iter()
            .map(|(tab, active)| NavTabInfo {
                tab,
                label: tab.label(),
                active,
            })
            .collect();

        HeaderViewModel {
            variant: HeaderVariant::from(self.search.focus()),
            search_bar: SearchBarInfo {
                query: self.search.text().to_string(),
                can_submit: self.search.is_submittable(),
            },
            tabs,
            signed_in: self.signed_in,
        }
    }

    fn compute_catalog(&self) -> CatalogViewModel {
        let query = self.catalog.query().filter(|query| !query.is_empty());
        let matcher = query.map(|_| SkimMatcherV2::default());

        let cards: Vec<CardViewModel> = self
            .catalog
            .listings()
            .iter()
            .map(|listing| self.compute_card(listing, query.zip(matcher.as_ref())))
            .collect();

        let loading = self.catalog.is_loading();
        let (error, retry_label) = match self.catalog.status() {
            LoadStatus::Failed(failure) => (
                Some(match failure.kind {
                    LoadKind::Initial => "We couldn't load stays right now.",
                    LoadKind::More => "We couldn't load more stays.",
                }),
                Some("Try again"),
            ),
            LoadStatus::Idle | LoadStatus::Loading { .. } => (None, None),
        };

        let empty_state = (self.catalog.has_loaded() && self.catalog.is_empty() && !loading).then(|| EmptyState {
            message: "No stays found".to_string(),
            subtitle: query.map_or_else(
                || "Check back soon for new places.".to_string(),
                |query| format!("Nothing matches \"{query}\". Try another destination."),
            ),
        });

        CatalogViewModel {
            cards,
            has_results: self.catalog.has_at_least_one(),
            loading,
            empty_state,
            error,
            retry_label,
            show_more: ShowMoreInfo {
                visible: self.catalog.has_more(),
                enabled: self.catalog.can_load_more(),
                label: if matches!(self.catalog.status(), LoadStatus::Loading { kind: LoadKind::More }) {
                    "Loading..."
                } else {
                    "Continue exploring"
                },
            },
        }
    }

    fn compute_card(&self, listing: &PropertyListing, search: Option<(&str, &SkimMatcherV2)>) -> CardViewModel {
        let highlight_ranges = search.map_or_else(Vec::new, |(query, matcher)| {
            Self::compute_highlight_ranges(&listing.title, query, matcher)
        });

        CardViewModel {
            id: listing.id.clone(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            price_label: listing.price_label.clone(),
            image: listing.cover_image().map(str::to_string),
            href: Route::Property(listing.id.clone()).path(),
            is_favorited: self.favorites.is_favorited(&listing.id),
            favorite_syncing: self.favorites.is_syncing(&listing.id),
            highlight_ranges,
        }
    }

    /// Computes character index ranges of `text` matched by `query`.
    ///
    /// Consecutive matched indices are coalesced into `(start, end)` ranges with an
    /// exclusive end.
    fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_login(&self) -> LoginViewModel {
        let reset_modal = (self.auth.modal() == ModalState::Open).then(|| ResetModalViewModel {
            title: "Reset your password",
            instructions: "Enter the email you signed up with and we'll send you a link to reset your password.",
            action_label: "Send reset link",
            status: self.auth.reset_status().clone(),
        });

        LoginViewModel {
            session: self.auth.session(),
            message: self.auth.message(self.route.is_login()),
            submit_enabled: !self.auth.is_submitting(),
            reset_modal,
        }
    }
}
