//! Rendering-facing layer.
//!
//! Stayview does not draw anything itself. It hands the rendering layer a
//! serializable view model per render:
//!
//! ```text
//! AppState → compute_viewmodel → PageViewModel → renderer (outside this crate)
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable page state

pub mod viewmodel;

pub use viewmodel::{
    CardViewModel, CatalogViewModel, EmptyState, HeaderViewModel, LoginViewModel, PageViewModel, SearchBarInfo,
};
