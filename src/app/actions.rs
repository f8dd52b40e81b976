//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order: route changes go to the router, requests go
//! to the collaborator outbox.
//!
//! # Example
//!
//! ```rust
//! use stayview::app::Action;
//! use stayview::domain::Route;
//!
//! let actions = vec![Action::Navigate(Route::Home)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::backend::BackendRequest;
use crate::domain::Route;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Tells the router to show `Route`.
    ///
    /// The state has already switched to the route when this is emitted.
    Navigate(Route),

    /// Posts a request to a collaborator. Its response comes back as
    /// [`Event::BackendResponded`](crate::app::Event::BackendResponded).
    PostToBackend(BackendRequest),
}
