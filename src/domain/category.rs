//! Course categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Identified, Resource};
use crate::domain::error::ServiceError;
use crate::service::json::Storable;
use crate::ui::views::CategoryView;

/// A course category as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub course_count: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Creates a category with only the required fields set.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            course_count: None,
            created_at: None,
        }
    }
}

/// Create payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Update payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Identified for Category {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Resource for Category {
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;
    type View = CategoryView;

    const KIND: &'static str = "category";

    fn to_view(&self) -> CategoryView {
        crate::ui::mapper::category_view(self)
    }
}

impl Storable for Category {
    fn from_draft(id: u64, draft: CategoryDraft, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::validation("Category name is required"));
        }
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            course_count: Some(0),
            created_at: Some(now),
        })
    }

    fn apply_patch(&mut self, patch: CategoryPatch, _now: DateTime<Utc>) -> Result<(), ServiceError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("Category name is required"));
            }
            self.name = name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        Ok(())
    }
}
