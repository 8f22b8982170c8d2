//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_service;

use chrono::{DateTime, TimeZone, Utc};

use coursedesk::app::{ManagedList, SearchKeys};
use coursedesk::domain::{
    ActionTag, AuditAction, AuditLogEntry, AuditResource, Category, Permission, ResourceTag, Role,
};
use coursedesk::Config;

pub use mock_service::MockService;

/// Builds categories with ids 1.. in the given order.
pub fn categories(names: &[&str]) -> Vec<Category> {
    names
        .iter()
        .zip(1..)
        .map(|(name, id)| Category::new(id, *name))
        .collect()
}

/// A category list screen over an in-memory service.
pub fn category_list(names: &[&str]) -> ManagedList<MockService<Category>> {
    ManagedList::new(
        MockService::with_records(categories(names)),
        "Categories",
        "categories",
        SearchKeys::new(["name", "description"]),
        &Config::default(),
    )
}

/// The built-in administrator role.
pub fn admin_role() -> Role {
    Role::system(
        1,
        "Administrator",
        ResourceTag::ALL
            .into_iter()
            .map(|resource| Permission::new(resource, ActionTag::ALL))
            .collect(),
    )
}

/// A custom role allowed to read and update courses.
pub fn editor_role(id: u64) -> Role {
    Role::new(
        id,
        "Course Editor",
        vec![Permission::new(ResourceTag::Courses, [ActionTag::Read, ActionTag::Update])],
    )
}

/// A role list screen over an in-memory service.
pub fn role_list(roles: Vec<Role>) -> ManagedList<MockService<Role>> {
    ManagedList::new(
        MockService::with_records(roles),
        "Roles",
        "roles",
        SearchKeys::new(["name", "description"]),
        &Config::default(),
    )
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid timestamp")
}

pub fn audit_entry(
    id: u64,
    user: Option<&str>,
    action: AuditAction,
    resource: AuditResource,
    timestamp: DateTime<Utc>,
) -> AuditLogEntry {
    AuditLogEntry {
        id,
        user_name: user.map(String::from),
        action,
        resource,
        resource_id: None,
        details: None,
        ip_address: None,
        timestamp,
    }
}
