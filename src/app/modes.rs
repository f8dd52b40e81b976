//! Focus and presentation mode enums.
//!
//! # State Machine
//!
//! The search box is either blurred or being typed into. The header has two
//! variants that follow the search focus:
//! - **Default**: logo, search summary and nav tabs
//! - **`SearchFocused`**: the expanded search form with a submit control
//!
//! # Example
//!
//! ```rust
//! use stayview::app::modes::{HeaderVariant, SearchFocus};
//!
//! assert_eq!(HeaderVariant::from(SearchFocus::Typing), HeaderVariant::SearchFocused);
//! ```

use serde::Serialize;

/// Focus state of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFocus {
    /// The search box does not have focus.
    #[default]
    Blurred,

    /// The user is typing in the search box.
    Typing,
}

/// Which header layout the rendering layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVariant {
    Default,
    SearchFocused,
}

impl From<SearchFocus> for HeaderVariant {
    fn from(focus: SearchFocus) -> Self {
        match focus {
            SearchFocus::Blurred => Self::Default,
            SearchFocus::Typing => Self::SearchFocused,
        }
    }
}
