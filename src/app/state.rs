//! Per-screen list state and view model computation.
//!
//! [`ListState`] is the single source of truth for one list screen: the
//! mapped collection, the current query, the fixed search keys, the four
//! modal instances, and the loading/error flags of the most recent request.
//! It is owned by the screen and discarded with it; there is no global state.
//!
//! The visible subset is never stored. [`ListState::visible_items`] and
//! [`ListState::compute_viewmodel`] recompute it from the collection and the
//! query on every call.
//!
//! # Example
//!
//! ```rust
//! use coursedesk::app::search::SearchKeys;
//! use coursedesk::app::ListState;
//! use coursedesk::domain::{Category, Resource};
//!
//! let mut state = ListState::new("Categories", "categories", SearchKeys::new(["name"]));
//! state.replace_all(vec![Category::new(1, "Design").to_view()]);
//! state.query = "des".to_string();
//!
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.header.title, "Categories (1 of 1)");
//! ```

use std::collections::HashSet;

use super::modal::Modals;
use super::search::{self, first_match, match_ranges, SearchKeys};
use crate::domain::entity::{Identified, Searchable};
use crate::service::messages::Operation;
use crate::ui::viewmodel::{DisplayRow, EmptyState, HeaderInfo, ListViewModel, SearchBarInfo};

/// The most recent failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Which call failed.
    pub operation: Operation,

    /// User-facing message.
    pub message: String,
}

/// State container for one list screen.
///
/// `V` is the display shape held in the collection. Mutated by the event
/// handler; view models are computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<V> {
    /// Mapped records in server order. No two elements share an id.
    ///
    /// Only response reconciliation writes this field through the handler.
    pub collection: Vec<V>,

    /// Current search query. Empty means no filter.
    pub query: String,

    /// Field names searched by the query. Fixed for the screen.
    pub keys: SearchKeys<V>,

    /// Add, edit, view, and delete modal state.
    pub modals: Modals<V>,

    /// `true` between dispatching a request and reconciling its response.
    pub loading: bool,

    /// Failure of the most recent request, cleared on the next dispatch.
    pub failure: Option<Failure>,

    /// Screen title used in the header, e.g. `"Courses"`.
    pub title: String,

    /// Plural noun used in the empty state, e.g. `"courses"`.
    pub noun: String,
}

impl<V> ListState<V>
where
    V: Identified + Searchable + Clone,
{
    /// Creates an empty screen state with all modals closed.
    #[must_use]
    pub fn new(title: impl Into<String>, noun: impl Into<String>, keys: SearchKeys<V>) -> Self {
        Self {
            collection: Vec::new(),
            query: String::new(),
            keys,
            modals: Modals::new(),
            loading: false,
            failure: None,
            title: title.into(),
            noun: noun.into(),
        }
    }

    /// Returns the elements matching the current query, in collection order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&V> {
        search::filter(&self.collection, &self.query, &self.keys)
    }

    /// Looks up an element by id.
    #[must_use]
    pub fn find(&self, id: &V::Id) -> Option<&V> {
        self.collection.iter().find(|item| item.id() == id)
    }

    /// Returns the message of the most recent failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    /// Replaces the whole collection. Later elements repeating an id are dropped.
    ///
    /// Returns the number of dropped duplicates.
    pub fn replace_all(&mut self, items: Vec<V>) -> usize {
        let mut seen = HashSet::with_capacity(items.len());
        let total = items.len();
        self.collection = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
        total - self.collection.len()
    }

    /// Appends an element, or replaces the element already holding its id.
    pub fn upsert(&mut self, item: V) {
        if let Some(existing) = self.collection.iter_mut().find(|e| e.id() == item.id()) {
            tracing::debug!(id = %item.id(), "created record already present, replacing");
            *existing = item;
        } else {
            self.collection.push(item);
        }
    }

    /// Replaces the element with the same id in place.
    ///
    /// Returns `false` (and changes nothing) if no element has that id.
    pub fn replace(&mut self, item: V) -> bool {
        match self.collection.iter_mut().find(|e| e.id() == item.id()) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => false,
        }
    }

    /// Removes the element with `id`. Returns `false` if it was absent.
    pub fn remove(&mut self, id: &V::Id) -> bool {
        let before = self.collection.len();
        self.collection.retain(|item| item.id() != id);
        self.collection.len() != before
    }

    /// Marks a request as in flight and clears the previous failure.
    pub fn begin(&mut self) {
        self.loading = true;
        self.failure = None;
    }

    /// Marks the in-flight request as reconciled successfully.
    pub fn settle(&mut self) {
        self.loading = false;
    }

    /// Records a failed request and clears the loading flag.
    pub fn fail(&mut self, operation: Operation, message: impl Into<String>) {
        self.loading = false;
        self.failure = Some(Failure {
            operation,
            message: message.into(),
        });
    }

    /// Computes the renderable view model from the current state.
    ///
    /// The header shows `"Title (n)"` without a query and `"Title (m of n)"`
    /// with one. When no rows are visible, the empty state distinguishes a
    /// failed list fetch, an empty collection, and a query without matches.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel<V> {
        let _span = tracing::debug_span!(
            "compute_viewmodel",
            total = self.collection.len(),
            query_len = self.query.len()
        )
        .entered();

        let needle = self.query.to_lowercase();
        let rows: Vec<DisplayRow<V>> = self
            .visible_items()
            .into_iter()
            .map(|item| {
                let matched_field = if self.query.is_empty() {
                    None
                } else {
                    first_match(item, &needle, &self.keys)
                };
                let highlight_ranges = matched_field
                    .and_then(|key| item.field(key))
                    .and_then(|value| value.as_text())
                    .map(|text| match_ranges(text, &self.query))
                    .unwrap_or_default();

                DisplayRow {
                    item: item.clone(),
                    matched_field,
                    highlight_ranges,
                }
            })
            .collect();

        let title = if self.query.is_empty() {
            format!("{} ({})", self.title, self.collection.len())
        } else {
            format!("{} ({} of {})", self.title, rows.len(), self.collection.len())
        };

        let fetch_failure = self
            .failure
            .as_ref()
            .filter(|f| f.operation == Operation::List);

        let empty_state = if !rows.is_empty() {
            None
        } else if let Some(failure) = fetch_failure {
            Some(EmptyState::error(&failure.message))
        } else if self.collection.is_empty() {
            Some(EmptyState::no_items(&self.noun))
        } else {
            Some(EmptyState::no_matches(&self.query))
        };

        ListViewModel {
            rows,
            header: HeaderInfo { title },
            search_bar: (!self.query.is_empty()).then(|| SearchBarInfo {
                query: self.query.clone(),
            }),
            empty_state,
            error: self.error().map(str::to_string),
            loading: self.loading,
            open_modal: self.modals.first_open(),
        }
    }
}
