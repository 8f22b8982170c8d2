//! Course records as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Identified, Resource};
use crate::domain::error::ServiceError;
use crate::service::json::Storable;
use crate::ui::views::CourseView;

/// Publication state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

/// A course as stored by the backend.
///
/// Everything except `id` and `title` is optional on the wire; the display
/// mapper substitutes placeholders for missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    pub category_name: Option<String>,
    pub instructor_name: Option<String>,
    pub status: Option<CourseStatus>,
    pub price: Option<f64>,
    pub enrollment_count: Option<u32>,
    pub rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Creates a course with only the required fields set.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            category_id: None,
            category_name: None,
            instructor_name: None,
            status: None,
            price: None,
            enrollment_count: None,
            rating: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Create payload for a course.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    pub instructor_name: Option<String>,
    pub price: Option<f64>,
    pub status: Option<CourseStatus>,
}

/// Update payload for a course.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<u64>,
    pub instructor_name: Option<String>,
    pub price: Option<f64>,
    pub status: Option<CourseStatus>,
}

impl Identified for Course {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Resource for Course {
    type Draft = CourseDraft;
    type Patch = CoursePatch;
    type View = CourseView;

    const KIND: &'static str = "course";

    fn to_view(&self) -> CourseView {
        crate::ui::mapper::course_view(self)
    }
}

fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::validation("Course title is required"));
    }
    Ok(())
}

fn validate_price(price: Option<f64>) -> Result<(), ServiceError> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => {
            Err(ServiceError::validation("Course price must be zero or positive"))
        }
        _ => Ok(()),
    }
}

impl Storable for Course {
    fn from_draft(id: u64, draft: CourseDraft, now: DateTime<Utc>) -> Result<Self, ServiceError> {
        validate_title(&draft.title)?;
        validate_price(draft.price)?;

        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            category_id: draft.category_id,
            category_name: None,
            instructor_name: draft.instructor_name,
            status: Some(draft.status.unwrap_or(CourseStatus::Draft)),
            price: draft.price,
            enrollment_count: Some(0),
            rating: None,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    fn apply_patch(&mut self, patch: CoursePatch, now: DateTime<Utc>) -> Result<(), ServiceError> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        validate_price(patch.price)?;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.category_id.is_some() {
            self.category_id = patch.category_id;
            self.category_name = None;
        }
        if patch.instructor_name.is_some() {
            self.instructor_name = patch.instructor_name;
        }
        if patch.price.is_some() {
            self.price = patch.price;
        }
        if patch.status.is_some() {
            self.status = patch.status;
        }
        self.updated_at = Some(now);
        Ok(())
    }
}
