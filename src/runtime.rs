//! Single-threaded session wiring state, router and backend together.
//!
//! [`Session`] plays the parts that surround the state machine on a real page:
//! it executes [`Action`]s, keeps the router's history and holds posted requests
//! in a FIFO outbox until [`Session::pump`] hands them to the backend. Requests
//! are answered in the order they were posted.
//!
//! # Example
//!
//! ```rust
//! use stayview::backend::FixtureBackend;
//! use stayview::domain::PropertyListing;
//! use stayview::{AppState, Event, Session};
//!
//! let backend = FixtureBackend::new(vec![PropertyListing::new("1", "Loft")], vec![]);
//! let mut session = Session::new(AppState::default(), backend);
//!
//! session.dispatch(&Event::CatalogRequested);
//! assert_eq!(session.outstanding(), 1);
//!
//! session.settle();
//! assert_eq!(session.state().catalog().len(), 1);
//! ```

use crate::app::{handle_event, Action, AppState, Event};
use crate::backend::{Backend, BackendRequest, BackendWorker};
use crate::domain::Route;
use crate::ui::PageViewModel;
use std::collections::VecDeque;

/// Drives one browsing session.
#[derive(Debug)]
pub struct Session<B> {
    state: AppState,
    worker: BackendWorker<B>,
    outbox: VecDeque<BackendRequest>,
    history: Vec<Route>,
}

impl<B: Backend> Session<B> {
    #[must_use]
    pub fn new(state: AppState, backend: B) -> Self {
        let history = vec![state.route().clone()];
        Self {
            state,
            worker: BackendWorker::new(backend),
            outbox: VecDeque::new(),
            history,
        }
    }

    /// Handles one event and executes the resulting actions.
    ///
    /// Route changes reported by the router itself are appended to the history
    /// as well. Returns whether the page should re-render. Handler errors are
    /// logged and leave the state untouched.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.state, event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute(action);
                }
                if self.history.last() != Some(self.state.route()) {
                    self.history.push(self.state.route().clone());
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "event rejected");
                false
            }
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Navigate(route) => {
                tracing::debug!(route = %route, "router push");
                self.history.push(route);
            }
            Action::PostToBackend(request) => {
                tracing::debug!(request_id = %request.id(), operation = request.operation(), "request posted");
                self.outbox.push_back(request);
            }
        }
    }

    /// Answers the oldest outstanding request. Returns false when none was waiting.
    pub fn pump(&mut self) -> bool {
        let Some(request) = self.outbox.pop_front() else {
            return false;
        };

        let response = self.worker.handle(request);
        self.dispatch(&Event::BackendResponded { response });
        true
    }

    /// Answers requests until the outbox is empty. Returns how many were answered.
    pub fn settle(&mut self) -> usize {
        let mut answered = 0;
        while self.pump() {
            answered += 1;
        }
        answered
    }

    /// Simulates the browser back button.
    ///
    /// Returns false when there is no earlier entry.
    pub fn back(&mut self) -> bool {
        if self.history.len() < 2 {
            return false;
        }

        self.history.pop();
        let Some(previous) = self.history.last() else {
            return false;
        };

        let path = previous.path();
        self.dispatch(&Event::RouteChanged { path })
    }

    /// Number of posted requests not yet answered.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outbox.len()
    }

    #[must_use]
    pub fn outbox(&self) -> impl Iterator<Item = &BackendRequest> {
        self.outbox.iter()
    }

    /// The route the router is showing.
    #[must_use]
    pub fn route(&self) -> &Route {
        self.state.route()
    }

    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> PageViewModel {
        self.state.compute_viewmodel()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.worker.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.worker.backend_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::navigation::NavEvent;
    use crate::backend::FixtureBackend;
    use crate::domain::PropertyListing;

    fn session() -> Session<FixtureBackend> {
        let listings = (1..=3)
            .map(|n| PropertyListing::new(n.to_string(), format!("Stay {n}")))
            .collect();
        Session::new(AppState::default(), FixtureBackend::new(listings, vec![]))
    }

    #[test]
    fn navigation_is_recorded_in_history() {
        let mut session = session();
        session.dispatch(&Event::Nav {
            event: NavEvent::ExperiencesTabClick,
        });
        session.dispatch(&Event::Nav {
            event: NavEvent::SignupLinkClick,
        });

        assert_eq!(session.history(), &[Route::Home, Route::Tours, Route::Signup]);
        assert!(session.back());
        assert_eq!(session.route(), &Route::Tours);
        assert!(session.back());
        assert!(!session.back());
        assert_eq!(session.route(), &Route::Home);
    }

    #[test]
    fn repeated_navigation_adds_no_history_entry() {
        let mut session = session();
        assert!(!session.dispatch(&Event::Nav { event: NavEvent::LogoClick }));
        session.dispatch(&Event::Nav {
            event: NavEvent::ExperiencesTabClick,
        });
        session.dispatch(&Event::Nav {
            event: NavEvent::ExperiencesTabClick,
        });

        assert_eq!(session.history(), &[Route::Home, Route::Tours]);
        assert!(session.back());
        assert!(!session.back());
    }

    #[test]
    fn requests_are_answered_in_order() {
        let mut session = session();
        session.dispatch(&Event::CatalogRequested);
        session.dispatch(&Event::SearchTextChanged { text: "Stay 2".to_string() });
        session.dispatch(&Event::SearchSubmitted);
        assert_eq!(session.outstanding(), 2);

        assert_eq!(session.settle(), 2);
        let ids: Vec<_> = session.state().catalog().listings().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn rejected_event_changes_nothing() {
        let mut session = session();
        assert!(!session.dispatch(&Event::RouteChanged { path: "nowhere".to_string() }));
        assert_eq!(session.route(), &Route::Home);
    }
}
