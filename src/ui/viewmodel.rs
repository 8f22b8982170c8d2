//! View model types representing renderable list-screen state.
//!
//! View models are computed from a [`ListState`](crate::app::ListState) via
//! `compute_viewmodel()` and handed to whatever renders the screen. They hold
//! no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use coursedesk::ui::viewmodel::{EmptyState, HeaderInfo, ListViewModel};
//! use coursedesk::ui::views::CategoryView;
//!
//! let vm: ListViewModel<CategoryView> = ListViewModel {
//!     rows: vec![],
//!     header: HeaderInfo { title: "Categories (0)".to_string() },
//!     search_bar: None,
//!     empty_state: Some(EmptyState::no_items("categories")),
//!     error: None,
//!     loading: false,
//!     open_modal: None,
//! };
//! assert!(vm.rows.is_empty());
//! ```

use crate::app::modal::ModalRole;

/// Complete view model for one list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel<V> {
    /// Visible rows after search filtering, in collection order.
    pub rows: Vec<DisplayRow<V>>,

    /// Header information (title with counts).
    pub header: HeaderInfo,

    /// Search bar state, present when a query is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Message shown in place of the table (no data, no matches, or error).
    pub empty_state: Option<EmptyState>,

    /// Message of the most recent failed request, shown next to the open modal.
    pub error: Option<String>,

    /// `true` while a request is in flight.
    pub loading: bool,

    /// The first open modal, in add/edit/view/delete order.
    pub open_modal: Option<ModalRole>,
}

/// One visible row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow<V> {
    /// The display shape.
    pub item: V,

    /// First search key whose value matched the query, if a query is active.
    pub matched_field: Option<&'static str>,

    /// Byte ranges `(start, end)` of the query within `matched_field`.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header information for the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. `"Courses (2 of 5)"`.
    pub title: String,
}

/// Search bar state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current query text.
    pub query: String,
}

/// Message displayed in place of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// `true` when the message reports a failure.
    pub is_error: bool,
}

impl EmptyState {
    /// Empty collection.
    #[must_use]
    pub fn no_items(noun: &str) -> Self {
        Self {
            message: format!("No {noun} yet"),
            is_error: false,
        }
    }

    /// Collection is non-empty but nothing matches the query.
    #[must_use]
    pub fn no_matches(query: &str) -> Self {
        Self {
            message: format!("No results for \"{query}\""),
            is_error: false,
        }
    }

    /// The list fetch failed.
    #[must_use]
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            is_error: true,
        }
    }
}
