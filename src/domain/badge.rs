//! Achievement badges awarded to learners.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Identified, Resource};
use crate::domain::error::ServiceError;
use crate::service::json::Storable;
use crate::ui::views::BadgeView;

/// A badge definition as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub criteria: Option<String>,
    pub points: Option<u32>,
    pub icon_url: Option<String>,
    pub awarded_count: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Badge {
    /// Creates a badge with only the required fields set.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            criteria: None,
            points: None,
            icon_url: None,
            awarded_count: None,
            created_at: None,
        }
    }
}

/// Create payload for a badge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BadgeDraft {
    pub name: String,
    pub description: Option<String>,
    pub criteria: Option<String>,
    pub points: Option<u32>,
    pub icon_url: Option<String>,
}

/// Update payload for a badge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BadgePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub criteria: Option<String>,
    pub points: Option<u32>,
    pub icon_url: Option<String>,
}

impl Identified for Badge {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Resource for Badge {
    type Draft = BadgeDraft;
    type Patch = BadgePatch;
    type View = BadgeView;

    const KIND: &'static str = "badge";

    fn to_view(&self) -> BadgeView {
        crate::ui::mapper::badge_view(self)
    }
}

impl Storable for Badge {
    fn from_draft(id: u64, draft: BadgeDraft, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::validation("Badge name is required"));
        }
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            criteria: draft.criteria,
            points: draft.points,
            icon_url: draft.icon_url,
            awarded_count: Some(0),
            created_at: Some(now),
        })
    }

    fn apply_patch(&mut self, patch: BadgePatch, _now: DateTime<Utc>) -> Result<(), ServiceError> {
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("Badge name is required"));
            }
            self.name = name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.criteria.is_some() {
            self.criteria = patch.criteria;
        }
        if patch.points.is_some() {
            self.points = patch.points;
        }
        if patch.icon_url.is_some() {
            self.icon_url = patch.icon_url;
        }
        Ok(())
    }
}
