//! Display shapes produced by the mappers in [`crate::ui::mapper`].
//!
//! Every field is defined: optional backend values have already been replaced
//! by placeholders. Text fields are exposed to the search engine by name.
//!
//! Placeholders such as `No description` or `Unknown` are ordinary text to the
//! search engine, so a short query like `no` also matches records that lack
//! the keyed value.

use crate::domain::entity::{FieldValue, Identified, Searchable};

/// A course row.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor: String,
    pub status: String,
    pub price: String,
    pub enrollments: u32,
    pub rating: String,
    pub created: String,
}

/// A category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub course_count: u32,
    pub created: String,
}

/// A badge row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub criteria: String,
    pub points: u32,
    pub icon_url: String,
    pub awarded: u32,
    pub created: String,
}

/// A role row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleView {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// `"courses: create, read; badges: read"`, or a placeholder when empty.
    pub permission_summary: String,
    pub permission_count: usize,
    pub is_system: bool,
    /// `"System"` or `"Custom"`.
    pub kind: String,
    pub user_count: u32,
}

/// An audit log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogView {
    pub id: u64,
    pub user: String,
    pub action: String,
    pub resource: String,
    pub resource_ref: String,
    pub details: String,
    pub ip_address: String,
    pub timestamp: String,
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardView {
    pub id: u64,
    pub rank: String,
    pub user: String,
    pub points: u64,
    pub completed_courses: u32,
    pub badges: u32,
    pub recent_courses: Vec<String>,
}

macro_rules! identified_by_id {
    ($($view:ty),* $(,)?) => {
        $(
            impl Identified for $view {
                type Id = u64;

                fn id(&self) -> &u64 {
                    &self.id
                }
            }
        )*
    };
}

identified_by_id!(CourseView, CategoryView, BadgeView, RoleView, AuditLogView, LeaderboardView);

impl Searchable for CourseView {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "title" => FieldValue::Text(&self.title),
            "description" => FieldValue::Text(&self.description),
            "category" => FieldValue::Text(&self.category),
            "instructor" => FieldValue::Text(&self.instructor),
            "status" => FieldValue::Text(&self.status),
            "price" => FieldValue::Text(&self.price),
            "rating" => FieldValue::Text(&self.rating),
            "created" => FieldValue::Text(&self.created),
            "enrollments" => FieldValue::Number(f64::from(self.enrollments)),
            _ => return None,
        };
        Some(value)
    }
}

impl Searchable for CategoryView {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "created" => FieldValue::Text(&self.created),
            "course_count" => FieldValue::Number(f64::from(self.course_count)),
            _ => return None,
        };
        Some(value)
    }
}

impl Searchable for BadgeView {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "criteria" => FieldValue::Text(&self.criteria),
            "created" => FieldValue::Text(&self.created),
            "points" => FieldValue::Number(f64::from(self.points)),
            "awarded" => FieldValue::Number(f64::from(self.awarded)),
            _ => return None,
        };
        Some(value)
    }
}

impl Searchable for RoleView {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "permissions" => FieldValue::Text(&self.permission_summary),
            "kind" => FieldValue::Text(&self.kind),
            "is_system" => FieldValue::Flag(self.is_system),
            "user_count" => FieldValue::Number(f64::from(self.user_count)),
            _ => return None,
        };
        Some(value)
    }
}

impl Searchable for AuditLogView {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        let value = match key {
            "user" => FieldValue::Text(&self.user),
            "action" => FieldValue::Text(&self.action),
            "resource" => FieldValue::Text(&self.resource),
            "resource_ref" => FieldValue::Text(&self.resource_ref),
            "details" => FieldValue::Text(&self.details),
            "ip_address" => FieldValue::Text(&self.ip_address),
            "timestamp" => FieldValue::Text(&self.timestamp),
            _ => return None,
        };
        Some(value)
    }
}

impl Searchable for LeaderboardView {
    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        #[allow(clippy::cast_precision_loss)]
        let value = match key {
            "rank" => FieldValue::Text(&self.rank),
            "user" => FieldValue::Text(&self.user),
            "points" => FieldValue::Number(self.points as f64),
            "completed_courses" => FieldValue::Number(f64::from(self.completed_courses)),
            "badges" => FieldValue::Number(f64::from(self.badges)),
            _ => return None,
        };
        Some(value)
    }
}
