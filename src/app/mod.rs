//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (runtime.rs, main.rs) and the
//! domain/backend layers. It implements the event-driven state machine behind
//! every page.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! UI Input → Events → Event Handler → Controller Mutations → Actions → Side Effects
//!                          ↑                                     ↓
//!                          └──────── Backend Responses ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Search focus and header variant types
//! - [`state`]: Central application state container and view model computation
//! - [`search`], [`catalog`], [`favorites`], [`navigation`], [`auth`]: the controllers
//!
//! # Example
//!
//! ```rust
//! use stayview::app::{handle_event, AppState, Event};
//!
//! let mut state = AppState::default();
//! let (should_render, _actions) = handle_event(&mut state, &Event::SearchFocused)?;
//! assert!(should_render);
//! # Ok::<(), stayview::StayviewError>(())
//! ```

pub mod actions;
pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod handler;
pub mod modes;
pub mod navigation;
pub mod search;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{HeaderVariant, SearchFocus};
pub use state::{AppState, Settings};
