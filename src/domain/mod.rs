//! Domain layer for the stayview core.
//!
//! Plain data types shared by the controllers, the collaborator messages and the
//! view models. Nothing here knows about request ids, routing side effects or
//! rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`listing`]: Listings, catalog pages and cursors
//! - [`route`]: Route strings exchanged with the router
//! - [`auth`]: Credentials and login failure classification

pub mod auth;
pub mod error;
pub mod listing;
pub mod route;

pub use auth::{AuthFailureReason, Credentials};
pub use error::{Result, StayviewError};
pub use listing::{CatalogPage, Cursor, ListingId, PropertyListing};
pub use route::Route;
