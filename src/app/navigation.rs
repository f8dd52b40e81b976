//! Mapping of discrete UI events to route changes.
//!
//! Navigation is a pure function of the event: it reads no catalog, search or auth
//! state. Clicks inside a property card go through [`CardClick::dispatch`] first.
//! The favorite button is the innermost handler and consumes its click, so a
//! favorite click can never reach the card's navigation handler. This is enforced
//! by the types: [`NavEvent`] has no favorite variant.

use crate::domain::{ListingId, Route};
use serde::{Deserialize, Serialize};

/// UI events that may change the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavEvent {
    LogoClick,
    PropertyCardClick { listing: ListingId },
    StaysTabClick,
    ExperiencesTabClick,
    SignupLinkClick,
    ForgotPasswordLinkClick,
}

/// Where a navigation event leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Route(Route),
    /// Opens the password-reset modal without a route change.
    OpenResetModal,
}

/// Stateless event-to-route mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationController;

impl NavigationController {
    /// Resolves an event to its target.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stayview::app::navigation::{NavEvent, NavTarget, NavigationController};
    /// use stayview::domain::Route;
    ///
    /// assert_eq!(
    ///     NavigationController::resolve(&NavEvent::ExperiencesTabClick),
    ///     NavTarget::Route(Route::Tours)
    /// );
    /// ```
    #[must_use]
    pub fn resolve(event: &NavEvent) -> NavTarget {
        match event {
            NavEvent::LogoClick | NavEvent::StaysTabClick => NavTarget::Route(Route::Home),
            NavEvent::PropertyCardClick { listing } => NavTarget::Route(Route::Property(listing.clone())),
            NavEvent::ExperiencesTabClick => NavTarget::Route(Route::Tours),
            NavEvent::SignupLinkClick => NavTarget::Route(Route::Signup),
            NavEvent::ForgotPasswordLinkClick => NavTarget::OpenResetModal,
        }
    }

    /// Header tabs with their active flag for `current`.
    #[must_use]
    pub fn tabs(current: &Route) -> [(Tab, bool); 2] {
        let active = Tab::for_route(current);
        [Tab::Stays, Tab::Experiences].map(|tab| (tab, active == Some(tab)))
    }
}

/// Header navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Stays,
    Experiences,
}

impl Tab {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stays => "Stays",
            Self::Experiences => "Experiences",
        }
    }

    #[must_use]
    pub const fn event(self) -> NavEvent {
        match self {
            Self::Stays => NavEvent::StaysTabClick,
            Self::Experiences => NavEvent::ExperiencesTabClick,
        }
    }

    /// The tab highlighted while `route` is showing.
    #[must_use]
    pub const fn for_route(route: &Route) -> Option<Self> {
        match route {
            Route::Home | Route::Property(_) => Some(Self::Stays),
            Route::Tours => Some(Self::Experiences),
            Route::Signup | Route::Login | Route::Other(_) => None,
        }
    }
}

/// Element of a property card that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTarget {
    Body,
    FavoriteButton,
}

/// A click somewhere inside a property card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardClick {
    pub listing: ListingId,
    pub target: CardTarget,
}

/// The single handler that ends up owning a card click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardHandler {
    /// Consumed by the favorite button; propagation stops here.
    ToggleFavorite(ListingId),
    /// Bubbled to the card's navigation handler.
    Navigate(NavEvent),
}

impl CardClick {
    #[must_use]
    pub fn dispatch(self) -> CardHandler {
        match self.target {
            CardTarget::FavoriteButton => {
                tracing::trace!(listing = %self.listing, "favorite click consumed before card navigation");
                CardHandler::ToggleFavorite(self.listing)
            }
            CardTarget::Body => CardHandler::Navigate(NavEvent::PropertyCardClick { listing: self.listing }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_table() {
        let cases = [
            (NavEvent::LogoClick, NavTarget::Route(Route::Home)),
            (
                NavEvent::PropertyCardClick { listing: ListingId::new("12") },
                NavTarget::Route(Route::Property(ListingId::new("12"))),
            ),
            (NavEvent::StaysTabClick, NavTarget::Route(Route::Home)),
            (NavEvent::ExperiencesTabClick, NavTarget::Route(Route::Tours)),
            (NavEvent::SignupLinkClick, NavTarget::Route(Route::Signup)),
            (NavEvent::ForgotPasswordLinkClick, NavTarget::OpenResetModal),
        ];

        for (event, expected) in cases {
            assert_eq!(NavigationController::resolve(&event), expected, "{event:?}");
        }
    }

    #[test]
    fn card_route_path() {
        let NavTarget::Route(route) =
            NavigationController::resolve(&NavEvent::PropertyCardClick { listing: ListingId::new("12") })
        else {
            panic!("expected a route");
        };
        assert_eq!(route.path(), "/property/12");
    }

    #[test]
    fn favorite_button_click_never_becomes_navigation() {
        let click = CardClick {
            listing: ListingId::new("3"),
            target: CardTarget::FavoriteButton,
        };
        assert_eq!(click.dispatch(), CardHandler::ToggleFavorite(ListingId::new("3")));
    }

    #[test]
    fn card_body_click_bubbles_to_navigation() {
        let click = CardClick {
            listing: ListingId::new("3"),
            target: CardTarget::Body,
        };
        assert_eq!(
            click.dispatch(),
            CardHandler::Navigate(NavEvent::PropertyCardClick { listing: ListingId::new("3") })
        );
    }

    #[test]
    fn tabs_follow_route() {
        assert_eq!(
            NavigationController::tabs(&Route::Property(ListingId::new("1"))),
            [(Tab::Stays, true), (Tab::Experiences, false)]
        );
        assert_eq!(
            NavigationController::tabs(&Route::Tours),
            [(Tab::Stays, false), (Tab::Experiences, true)]
        );
        assert_eq!(
            NavigationController::tabs(&Route::Login),
            [(Tab::Stays, false), (Tab::Experiences, false)]
        );
    }
}
