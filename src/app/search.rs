//! In-progress search text on the home page.

use super::modes::SearchFocus;

/// Emitted when a search is submitted. Holds the trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequested {
    pub query: String,
}

/// Holds the search box text and focus.
///
/// Created empty on page load and never persisted.
#[derive(Debug, Clone, Default)]
pub struct SearchQueryModel {
    text: String,
    focus: SearchFocus,
}

impl SearchQueryModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current text. No validation happens here.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        tracing::trace!(query = %self.text, "search text updated");
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.trimmed().is_empty()
    }

    #[must_use]
    pub const fn focus(&self) -> SearchFocus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: SearchFocus) {
        self.focus = focus;
    }

    /// Snapshots the text into a search request.
    ///
    /// Returns `None` for whitespace-only text; nothing is emitted in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use stayview::app::search::SearchQueryModel;
    ///
    /// let mut search = SearchQueryModel::new();
    /// search.set_text("   ");
    /// assert!(search.submit().is_none());
    ///
    /// search.set_text("  da lat ");
    /// assert_eq!(search.submit().unwrap().query, "da lat");
    /// ```
    #[must_use]
    pub fn submit(&self) -> Option<SearchRequested> {
        if !self.is_submittable() {
            tracing::debug!("empty search skipped");
            return None;
        }

        Some(SearchRequested {
            query: self.trimmed().to_string(),
        })
    }
}
