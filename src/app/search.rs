//! Search/filter engine for list screens.
//!
//! [`filter`] derives the visible subset of a collection from a query and a
//! fixed set of [`SearchKeys`]. It is recomputed from scratch on every call:
//! no caching, no ranking, and the relative order of the input is kept.
//!
//! # Matching
//!
//! - An empty query returns every element, in order.
//! - Otherwise an element is kept if at least one keyed field is text and,
//!   lowercased, contains the lowercased query.
//! - Keys naming a missing or non-text field never match and never fail.
//! - Fields are matched as displayed, placeholder text included.

use std::fmt;
use std::marker::PhantomData;

use crate::domain::entity::Searchable;

/// Field names considered by the search engine for one screen.
///
/// Fixed at construction and never mutated.
pub struct SearchKeys<T> {
    keys: Vec<&'static str>,
    _entity: PhantomData<fn(&T)>,
}

impl<T> SearchKeys<T> {
    /// Creates a key set. Duplicate names are kept once, first occurrence wins.
    pub fn new(keys: impl IntoIterator<Item = &'static str>) -> Self {
        let mut unique: Vec<&'static str> = Vec::new();
        for key in keys {
            if !unique.contains(&key) {
                unique.push(key);
            }
        }
        Self {
            keys: unique,
            _entity: PhantomData,
        }
    }

    /// Returns the key names in order.
    #[must_use]
    pub fn as_slice(&self) -> &[&'static str] {
        &self.keys
    }

    /// Returns `true` if no keys are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<T> Clone for SearchKeys<T> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SearchKeys<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SearchKeys").field(&self.keys).finish()
    }
}

impl<T> PartialEq for SearchKeys<T> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

/// Returns the elements of `collection` matching `query` on any of `keys`.
///
/// # Example
///
/// ```rust
/// use coursedesk::app::search::{filter, SearchKeys};
/// use coursedesk::domain::Category;
/// use coursedesk::domain::Resource;
///
/// let views = vec![
///     Category::new(1, "Alpha").to_view(),
///     Category::new(2, "Beta").to_view(),
/// ];
/// let keys = SearchKeys::new(["name"]);
///
/// let visible = filter(&views, "alp", &keys);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].name, "Alpha");
/// ```
#[must_use]
pub fn filter<'a, T: Searchable>(collection: &'a [T], query: &str, keys: &SearchKeys<T>) -> Vec<&'a T> {
    let _span = tracing::debug_span!(
        "search_filter",
        total = collection.len(),
        query_len = query.len(),
        keys = keys.keys.len()
    )
    .entered();

    if query.is_empty() {
        return collection.iter().collect();
    }

    let needle = query.to_lowercase();
    let filtered: Vec<&T> = collection
        .iter()
        .filter(|item| first_match(*item, &needle, keys).is_some())
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "search filter applied");
    filtered
}

/// Returns the first key whose text value contains `needle`.
///
/// `needle` must already be lowercased.
pub(crate) fn first_match<T: Searchable>(item: &T, needle: &str, keys: &SearchKeys<T>) -> Option<&'static str> {
    keys.keys.iter().copied().find(|key| {
        item.field(key)
            .and_then(|value| value.as_text())
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Computes byte ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Ranges are non-overlapping, ascending, and always fall on character
/// boundaries of `text`. Returns nothing for an empty query, or when
/// lowercasing changes byte lengths (ranges could not be mapped back).
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let haystack = text.to_lowercase();
    let needle = query.to_lowercase();
    if haystack.len() != text.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut offset = 0;
    while let Some(pos) = haystack[offset..].find(&needle) {
        let start = offset + pos;
        let end = start + needle.len();
        if text.is_char_boundary(start) && text.is_char_boundary(end) {
            ranges.push((start, end));
        }
        offset = end;
    }
    ranges
}
