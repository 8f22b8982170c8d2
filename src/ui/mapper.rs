//! Display mappers: backend records to display shapes.
//!
//! Each mapper is a total, pure function. Missing optional fields become a
//! defined placeholder, the input is only borrowed, and no clock or I/O is
//! consulted, so mapping the same record twice yields equal views.

use chrono::{DateTime, Utc};

use crate::domain::{AuditLogEntry, Badge, Category, Course, LeaderboardEntry, Role};
use crate::ui::views::{
    AuditLogView, BadgeView, CategoryView, CourseView, LeaderboardView, RoleView,
};

/// Placeholder for a missing person or value.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a course without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Placeholder for a missing description.
pub const NO_DESCRIPTION: &str = "No description";

/// Placeholder for a missing metric.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing reference or rank.
pub const EMPTY_MARKER: &str = "-";

/// Icon shown for badges without one.
pub const DEFAULT_BADGE_ICON: &str = "/static/badges/default.svg";

/// Maps a course record.
#[must_use]
pub fn course_view(course: &Course) -> CourseView {
    CourseView {
        id: course.id,
        title: non_blank(Some(&course.title), "Untitled course"),
        description: non_blank(course.description.as_deref(), NO_DESCRIPTION),
        category: non_blank(course.category_name.as_deref(), UNCATEGORIZED),
        instructor: non_blank(course.instructor_name.as_deref(), UNKNOWN),
        status: course
            .status
            .map_or_else(|| UNKNOWN.to_string(), |s| s.label().to_string()),
        price: format_price(course.price),
        enrollments: course.enrollment_count.unwrap_or(0),
        rating: course
            .rating
            .filter(|r| r.is_finite())
            .map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("{r:.1}")),
        created: format_date(course.created_at),
    }
}

/// Maps a category record.
#[must_use]
pub fn category_view(category: &Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: non_blank(Some(&category.name), UNKNOWN),
        description: non_blank(category.description.as_deref(), NO_DESCRIPTION),
        course_count: category.course_count.unwrap_or(0),
        created: format_date(category.created_at),
    }
}

/// Maps a badge record.
#[must_use]
pub fn badge_view(badge: &Badge) -> BadgeView {
    BadgeView {
        id: badge.id,
        name: non_blank(Some(&badge.name), UNKNOWN),
        description: non_blank(badge.description.as_deref(), NO_DESCRIPTION),
        criteria: non_blank(badge.criteria.as_deref(), NOT_AVAILABLE),
        points: badge.points.unwrap_or(0),
        icon_url: non_blank(badge.icon_url.as_deref(), DEFAULT_BADGE_ICON),
        awarded: badge.awarded_count.unwrap_or(0),
        created: format_date(badge.created_at),
    }
}

/// Maps a role record, summarizing its permissions.
#[must_use]
pub fn role_view(role: &Role) -> RoleView {
    let summary = role
        .permissions()
        .iter()
        .filter(|p| !p.actions.is_empty())
        .map(|p| {
            let actions: Vec<&str> = p.actions.iter().map(|a| a.as_str()).collect();
            format!("{}: {}", p.resource, actions.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ");

    RoleView {
        id: role.id,
        name: non_blank(Some(&role.name), UNKNOWN),
        description: non_blank(role.description.as_deref(), NO_DESCRIPTION),
        permission_summary: if summary.is_empty() {
            "No permissions".to_string()
        } else {
            summary
        },
        permission_count: role.permissions().len(),
        is_system: role.is_system,
        kind: if role.is_system { "System" } else { "Custom" }.to_string(),
        user_count: role.user_count.unwrap_or(0),
    }
}

/// Maps an audit log entry.
#[must_use]
pub fn audit_log_view(entry: &AuditLogEntry) -> AuditLogView {
    AuditLogView {
        id: entry.id,
        user: non_blank(entry.user_name.as_deref(), UNKNOWN),
        action: entry.action.label().to_string(),
        resource: entry.resource.label().to_string(),
        resource_ref: non_blank(entry.resource_id.as_deref(), EMPTY_MARKER),
        details: non_blank(entry.details.as_deref(), EMPTY_MARKER),
        ip_address: non_blank(entry.ip_address.as_deref(), UNKNOWN),
        timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}

/// Maps a leaderboard standing.
///
/// `recent_courses` is copied as sent; an entry with a completion count but
/// no detail list shows an empty list, not an invented one.
#[must_use]
pub fn leaderboard_view(entry: &LeaderboardEntry) -> LeaderboardView {
    LeaderboardView {
        id: entry.id,
        rank: entry
            .rank
            .map_or_else(|| EMPTY_MARKER.to_string(), |r| format!("#{r}")),
        user: non_blank(entry.user_name.as_deref(), UNKNOWN),
        points: entry.points.unwrap_or(0),
        completed_courses: entry.completed_courses.unwrap_or(0),
        badges: entry.badges_earned.unwrap_or(0),
        recent_courses: entry.recent_courses.clone(),
    }
}

/// Maps a whole standings list, filling missing ranks from list position.
///
/// Positions are 1-based and only used when the backend omitted `rank`.
#[must_use]
pub fn leaderboard_views(entries: &[LeaderboardEntry]) -> Vec<LeaderboardView> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let mut view = leaderboard_view(entry);
            if entry.rank.is_none() {
                view.rank = format!("#{}", position + 1);
            }
            view
        })
        .collect()
}

fn non_blank(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

fn format_date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| UNKNOWN.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() && p > 0.0 => format!("${p:.2}"),
        Some(p) if p.is_finite() => "Free".to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
