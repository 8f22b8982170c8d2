//! Display mappers: placeholders and purity.

mod common;

use common::{admin_role, audit_entry, editor_role, utc};
use coursedesk::domain::{AuditAction, AuditResource, Badge, Course, CourseStatus, LeaderboardEntry, Resource, Role};
use coursedesk::ui::mapper::{
    audit_log_view, leaderboard_view, leaderboard_views, DEFAULT_BADGE_ICON, EMPTY_MARKER, NOT_AVAILABLE,
    NO_DESCRIPTION, UNCATEGORIZED, UNKNOWN,
};

fn standing(id: u64, rank: Option<u32>) -> LeaderboardEntry {
    LeaderboardEntry {
        id,
        user_name: None,
        points: None,
        completed_courses: None,
        badges_earned: None,
        rank,
        recent_courses: vec![],
    }
}

#[test]
fn bare_course_gets_placeholders() {
    let view = Course::new(1, "Intro to Rust").to_view();

    assert_eq!(view.title, "Intro to Rust");
    assert_eq!(view.description, NO_DESCRIPTION);
    assert_eq!(view.category, UNCATEGORIZED);
    assert_eq!(view.instructor, UNKNOWN);
    assert_eq!(view.status, UNKNOWN);
    assert_eq!(view.price, NOT_AVAILABLE);
    assert_eq!(view.enrollments, 0);
    assert_eq!(view.rating, NOT_AVAILABLE);
    assert_eq!(view.created, UNKNOWN);
}

#[test]
fn populated_course_is_formatted() {
    let mut course = Course::new(7, "Async Rust");
    course.category_name = Some("Programming".into());
    course.instructor_name = Some("  Grace  ".into());
    course.status = Some(CourseStatus::Published);
    course.price = Some(49.0);
    course.enrollment_count = Some(120);
    course.rating = Some(4.76);
    course.created_at = Some(utc(2024, 1, 9, 14, 0));

    let view = course.to_view();

    assert_eq!(view.category, "Programming");
    assert_eq!(view.instructor, "Grace");
    assert_eq!(view.status, "Published");
    assert_eq!(view.price, "$49.00");
    assert_eq!(view.enrollments, 120);
    assert_eq!(view.rating, "4.8");
    assert_eq!(view.created, "2024-01-09");
}

#[test]
fn free_course_is_not_missing_price() {
    let mut course = Course::new(2, "Free Sampler");
    course.price = Some(0.0);

    assert_eq!(course.to_view().price, "Free");
}

#[test]
fn mapping_is_referentially_transparent() {
    let mut course = Course::new(3, "Same Input");
    course.rating = Some(3.0);

    assert_eq!(course.to_view(), course.to_view());
    assert_eq!(admin_role().to_view(), admin_role().to_view());
}

#[test]
fn blank_category_name_uses_placeholder() {
    let mut category = common::categories(&["   "]).remove(0);
    category.description = Some(String::new());

    let view = category.to_view();
    assert_eq!(view.name, UNKNOWN);
    assert_eq!(view.description, NO_DESCRIPTION);
    assert_eq!(view.course_count, 0);
}

#[test]
fn badge_defaults_icon_and_counts() {
    let view = Badge::new(5, "Early Bird").to_view();

    assert_eq!(view.icon_url, DEFAULT_BADGE_ICON);
    assert_eq!(view.criteria, NOT_AVAILABLE);
    assert_eq!(view.points, 0);
    assert_eq!(view.awarded, 0);
}

#[test]
fn role_view_summarizes_permissions() {
    let view = editor_role(2).to_view();

    assert_eq!(view.permission_summary, "courses: read, update");
    assert_eq!(view.permission_count, 1);
    assert_eq!(view.kind, "Custom");
    assert!(!view.is_system);

    let empty = Role::new(3, "Guest", vec![]).to_view();
    assert_eq!(empty.permission_summary, "No permissions");

    let admin = admin_role().to_view();
    assert_eq!(admin.kind, "System");
    assert!(admin.is_system);
}

#[test]
fn audit_entry_placeholders() {
    let entry = audit_entry(1, None, AuditAction::Publish, AuditResource::Course, utc(2024, 3, 5, 16, 45));

    let view = audit_log_view(&entry);

    assert_eq!(view.user, UNKNOWN);
    assert_eq!(view.action, "Publish");
    assert_eq!(view.resource, "Course");
    assert_eq!(view.resource_ref, EMPTY_MARKER);
    assert_eq!(view.ip_address, UNKNOWN);
    assert_eq!(view.timestamp, "2024-03-05 16:45:00 UTC");
}

#[test]
fn leaderboard_rank_fills_from_position_only_when_missing() {
    let entries = vec![standing(10, None), standing(11, Some(7)), standing(12, None)];

    let ranks: Vec<String> = leaderboard_views(&entries).into_iter().map(|v| v.rank).collect();

    assert_eq!(ranks, ["#1", "#7", "#3"]);
    assert_eq!(leaderboard_view(&entries[0]).rank, EMPTY_MARKER);
}

#[test]
fn leaderboard_never_invents_recent_courses() {
    let mut entry = standing(1, Some(1));
    entry.completed_courses = Some(4);

    let view = leaderboard_view(&entry);
    assert_eq!(view.completed_courses, 4);
    assert!(view.recent_courses.is_empty());

    entry.recent_courses = vec!["Rust 101".into()];
    assert_eq!(leaderboard_view(&entry).recent_courses, ["Rust 101"]);
    assert_eq!(leaderboard_view(&entry).user, UNKNOWN);
}
