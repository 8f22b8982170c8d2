//! Entity traits shared by every managed list.
//!
//! A list screen is generic over a backend record type implementing
//! [`Resource`]. The record names its identifier, its create and update
//! payloads, and the display shape it maps to. Display shapes implement
//! [`Searchable`] so the search engine can read their fields by name.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use crate::domain::error::Result;

/// An entity with a stable identifier.
pub trait Identified {
    /// Identifier type. Unique within a collection.
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Returns the entity's identifier.
    fn id(&self) -> &Self::Id;
}

/// A field value exposed to the search engine.
///
/// Only [`FieldValue::Text`] participates in matching. Numbers and flags must
/// be pre-formatted into a text field before being listed as a search key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// A string field.
    Text(&'a str),
    /// A numeric field.
    Number(f64),
    /// A boolean field.
    Flag(bool),
}

impl<'a> FieldValue<'a> {
    /// Returns the text content if this is a text field.
    #[must_use]
    pub const fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) | Self::Flag(_) => None,
        }
    }
}

/// Field lookup by name for search filtering.
pub trait Searchable {
    /// Returns the value of the named field, or `None` if there is no such field.
    fn field(&self, key: &str) -> Option<FieldValue<'_>>;
}

/// A backend record managed by a list screen.
///
/// `Draft` and `Patch` are the create and update payloads (partial records).
/// `View` is the display shape produced by the display mapper.
pub trait Resource: Identified + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Payload for creating a record. Server-assigned fields are absent.
    type Draft: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Payload for updating a record. `None` fields are left untouched.
    type Patch: Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Display shape held by the list screen.
    type View: Identified<Id = Self::Id> + Searchable + Clone + Debug + PartialEq + Send + Sync + 'static;

    /// Short lowercase name used in logs and messages (`"course"`, `"role"`).
    const KIND: &'static str;

    /// Maps the record into its display shape.
    ///
    /// Must be pure: same input, same output, no I/O.
    fn to_view(&self) -> Self::View;

    /// Rejects mutation of a protected entity before any remote call is made.
    ///
    /// # Errors
    ///
    /// Returns an error if `view` must not be updated or deleted.
    fn ensure_mutable(view: &Self::View) -> Result<()> {
        let _ = view;
        Ok(())
    }
}
