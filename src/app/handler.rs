//! Event handling and state transition logic.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the rendering layer, the router, or a collaborator
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations happen through the owning controller's methods
//! 4. Actions are collected and returned for execution
//!
//! Each event runs to completion before the next one is handled. The only
//! suspension points are the requests emitted as [`Action::PostToBackend`].
//!
//! # Event Types
//!
//! - **Search**: `SearchTextChanged`, `SearchFocused`, `SearchBlurred`, `SearchSubmitted`
//! - **Catalog**: `CatalogRequested`, `ShowMoreClicked`, `RetryClicked`, `CardClicked`
//! - **Navigation**: `Nav`, `RouteChanged`
//! - **Auth**: `LoginSubmitted`, `ResetModalClosed`, `ResetLinkRequested`
//! - **Notices**: `NoticeDismissed`, `Tick`
//! - **Collaborator**: `BackendResponded` with typed response variants
//!
//! # Example
//!
//! ```rust
//! use stayview::app::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (_, actions) = handle_event(&mut state, &Event::CatalogRequested)?;
//! assert!(matches!(actions[..], [Action::PostToBackend(_)]));
//! # Ok::<(), stayview::StayviewError>(())
//! ```

use crate::app::catalog::LoadMore;
use crate::app::modes::SearchFocus;
use crate::app::navigation::{CardClick, CardHandler, CardTarget, NavEvent, NavTarget, NavigationController};
use crate::app::{Action, AppState};
use crate::backend::BackendResponse;
use crate::domain::error::Result;
use crate::domain::{Credentials, ListingId, Route};
use serde::Deserialize;

/// Events triggered by user input, the router, or collaborator responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The search box text changed (every keystroke).
    SearchTextChanged { text: String },
    SearchFocused,
    SearchBlurred,
    /// The search form was submitted.
    SearchSubmitted,

    /// The home page mounted and wants its first page.
    CatalogRequested,
    /// "Continue exploring" was clicked.
    ShowMoreClicked,
    /// The retry affordance of a failed load was clicked.
    RetryClicked,
    /// A click landed inside a property card.
    CardClicked { listing: ListingId, target: CardTarget },

    /// A navigation element outside the cards was clicked.
    Nav { event: NavEvent },
    /// The router reports a route change it made on its own (history, address bar).
    RouteChanged { path: String },

    LoginSubmitted { email: String, password: String },
    ResetModalClosed,
    ResetLinkRequested { email: String },

    NoticeDismissed,
    /// Clock tick used to expire transient notices. `now` is a Unix timestamp.
    Tick { now: i64 },

    /// A collaborator answered an earlier request.
    BackendResponded { response: BackendResponse },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns [`StayviewError::InvalidRoute`](crate::StayviewError::InvalidRoute) when
/// the router reports a path that is not absolute. Collaborator failures are never
/// errors here; they become status on the owning controller.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchTextChanged { text } => {
            state.search.set_text(text.clone());
            Ok((true, vec![]))
        }
        Event::SearchFocused => Ok((set_search_focus(state, SearchFocus::Typing), vec![])),
        Event::SearchBlurred => Ok((set_search_focus(state, SearchFocus::Blurred), vec![])),
        Event::SearchSubmitted => {
            let Some(request) = state.search.submit() else {
                return Ok((false, vec![]));
            };

            tracing::debug!(query = %request.query, "search submitted");
            let mut actions = vec![];

            if state.route != Route::Home {
                state.enter_route(Route::Home);
                actions.push(Action::Navigate(Route::Home));
            }

            let fetch = state.catalog.load_initial(&mut state.requests, Some(request.query));
            actions.push(Action::PostToBackend(fetch.into()));
            state.search.set_focus(SearchFocus::Blurred);

            Ok((true, actions))
        }
        Event::CatalogRequested => {
            if state.catalog.has_loaded() || state.catalog.is_loading() {
                tracing::debug!("catalog already loaded or loading");
                return Ok((false, vec![]));
            }

            let fetch = state.catalog.load_initial(&mut state.requests, None);
            Ok((true, vec![Action::PostToBackend(fetch.into())]))
        }
        Event::ShowMoreClicked => match state.catalog.load_more(&mut state.requests) {
            LoadMore::Issued(fetch) => Ok((true, vec![Action::PostToBackend(fetch.into())])),
            LoadMore::Coalesced(_) | LoadMore::Exhausted => Ok((false, vec![])),
        },
        Event::RetryClicked => Ok(state.catalog.retry(&mut state.requests).map_or_else(
            || (false, vec![]),
            |fetch| (true, vec![Action::PostToBackend(fetch.into())]),
        )),
        Event::CardClicked { listing, target } => {
            let click = CardClick {
                listing: listing.clone(),
                target: *target,
            };

            match click.dispatch() {
                CardHandler::ToggleFavorite(listing) => {
                    let toggle = state.favorites.toggle(&listing, &mut state.requests);
                    let actions = toggle.request().map(Action::PostToBackend).into_iter().collect();
                    Ok((true, actions))
                }
                CardHandler::Navigate(nav) => Ok(navigate(state, &nav)),
            }
        }
        Event::Nav { event } => Ok(navigate(state, event)),
        Event::RouteChanged { path } => {
            let route = Route::parse(path)?;
            Ok((state.enter_route(route), vec![]))
        }
        Event::LoginSubmitted { email, password } => {
            let credentials = Credentials::new(email.clone(), password.clone());
            Ok(state.auth.submit(credentials, &mut state.requests).map_or_else(
                || (false, vec![]),
                |request| (true, vec![Action::PostToBackend(request)]),
            ))
        }
        Event::ResetModalClosed => Ok((state.auth.close_reset_modal(), vec![])),
        Event::ResetLinkRequested { email } => Ok(state.auth.send_reset_link(email, &mut state.requests).map_or_else(
            || (false, vec![]),
            |request| (true, vec![Action::PostToBackend(request)]),
        )),
        Event::NoticeDismissed => Ok((state.favorites.dismiss_notice(), vec![])),
        Event::Tick { now } => {
            let ttl = state.settings.notice_ttl_secs;
            Ok((state.favorites.expire_notice(*now, ttl), vec![]))
        }
        Event::BackendResponded { response } => Ok(apply_response(state, response.clone())),
    }
}

fn set_search_focus(state: &mut AppState, focus: SearchFocus) -> bool {
    if state.search.focus() == focus {
        return false;
    }
    state.search.set_focus(focus);
    true
}

fn navigate(state: &mut AppState, event: &NavEvent) -> (bool, Vec<Action>) {
    match NavigationController::resolve(event) {
        NavTarget::Route(route) => {
            if !state.enter_route(route.clone()) {
                tracing::debug!(route = %route, "already on route");
                return (false, vec![]);
            }
            tracing::debug!(route = %route, "navigating");
            (true, vec![Action::Navigate(route)])
        }
        NavTarget::OpenResetModal => (state.auth.open_reset_modal(), vec![]),
    }
}

fn apply_response(state: &mut AppState, response: BackendResponse) -> (bool, Vec<Action>) {
    match response {
        BackendResponse::ListingsLoaded { id, page } => match state.catalog.apply_page(id, page) {
            Some(summary) => {
                state.favorites.seed(summary.favorited);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        BackendResponse::ListingsFailed { id, reason } => (state.catalog.apply_failure(id, reason), vec![]),
        BackendResponse::FavoriteSaved { id, listing, favorited } => {
            state.favorites.apply_saved(id, &listing, favorited);
            (true, vec![])
        }
        BackendResponse::FavoriteFailed { id, listing, reason, .. } => {
            let now = chrono::Utc::now().timestamp();
            state.favorites.apply_failed(id, &listing, reason, now);
            (true, vec![])
        }
        BackendResponse::LoginSucceeded { id } => {
            if !state.auth.apply_login_succeeded(id) {
                return (false, vec![]);
            }

            state.signed_in = true;
            let destination = state.settings.post_login_route.clone();
            state.enter_route(destination.clone());
            (true, vec![Action::Navigate(destination)])
        }
        BackendResponse::LoginFailed { id, reason } => (state.auth.apply_login_failed(id, reason), vec![]),
        BackendResponse::ResetLinkAcknowledged { id, email } => (state.auth.apply_reset_acknowledged(id, email), vec![]),
        BackendResponse::ResetLinkFailed { id, reason } => (state.auth.apply_reset_failed(id, reason), vec![]),
    }
}
