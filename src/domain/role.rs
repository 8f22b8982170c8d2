//! Roles, permissions, and access evaluation.
//!
//! A [`Role`] owns an ordered list of [`Permission`] entries, each pairing a
//! [`ResourceTag`] with the set of [`ActionTag`]s allowed on it. Roles flagged
//! `is_system` can be evaluated but never mutated: every mutation method fails
//! with [`ConsoleError::SystemRoleImmutable`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Identified, Resource};
use crate::domain::error::{ConsoleError, Result, ServiceError};
use crate::service::json::Storable;
use crate::ui::views::RoleView;

/// Permission-checked resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTag {
    Courses,
    Categories,
    Badges,
    Certifications,
    Leaderboards,
    Reviews,
    Users,
    Roles,
    AuditLogs,
    Settings,
}

impl ResourceTag {
    /// Every resource tag, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Courses,
        Self::Categories,
        Self::Badges,
        Self::Certifications,
        Self::Leaderboards,
        Self::Reviews,
        Self::Users,
        Self::Roles,
        Self::AuditLogs,
        Self::Settings,
    ];

    /// Wire name of the tag (`"courses"`, `"audit_logs"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Courses => "courses",
            Self::Categories => "categories",
            Self::Badges => "badges",
            Self::Certifications => "certifications",
            Self::Leaderboards => "leaderboards",
            Self::Reviews => "reviews",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::AuditLogs => "audit_logs",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for ResourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceTag {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ConsoleError::UnknownTag {
                kind: "resource",
                value: s.to_string(),
            })
    }
}

/// Permission-checked operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTag {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    Export,
}

impl ActionTag {
    /// Every action tag, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::Approve,
        Self::Export,
    ];

    /// Wire name of the tag (`"delete"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionTag {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ConsoleError::UnknownTag {
                kind: "action",
                value: s.to_string(),
            })
    }
}

/// Actions allowed on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: ResourceTag,
    #[serde(default)]
    pub actions: BTreeSet<ActionTag>,
}

impl Permission {
    /// Creates a permission entry from a resource and its allowed actions.
    pub fn new(resource: ResourceTag, actions: impl IntoIterator<Item = ActionTag>) -> Self {
        Self {
            resource,
            actions: actions.into_iter().collect(),
        }
    }

    /// Returns `true` if this entry allows `action`.
    #[must_use]
    pub fn allows(&self, action: ActionTag) -> bool {
        self.actions.contains(&action)
    }
}

/// A named set of permissions assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    permissions: Vec<Permission>,
    #[serde(default)]
    pub is_system: bool,
    pub user_count: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Role {
    /// Creates a mutable (non-system) role with the given permissions.
    ///
    /// Entries for the same resource are merged, keeping the position of the
    /// first occurrence.
    pub fn new(id: u64, name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            permissions: merge_permissions(permissions),
            is_system: false,
            user_count: None,
            created_at: None,
        }
    }

    /// Creates a system role. Its permission set is fixed for its lifetime.
    pub fn system(id: u64, name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            is_system: true,
            ..Self::new(id, name, permissions)
        }
    }

    /// Returns the role's permission entries in declaration order.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns `true` if the role may perform `action` on `resource`.
    #[must_use]
    pub fn can_perform(&self, resource: ResourceTag, action: ActionTag) -> bool {
        can_perform(self, resource, action)
    }

    /// Fails if the role is a system role.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SystemRoleImmutable`] for system roles.
    pub fn guard_mutation(&self) -> Result<()> {
        if self.is_system {
            tracing::debug!(role = %self.name, "rejected mutation of system role");
            return Err(ConsoleError::SystemRoleImmutable {
                role: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Allows `action` on `resource`, adding an entry for the resource if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SystemRoleImmutable`] for system roles.
    pub fn grant(&mut self, resource: ResourceTag, action: ActionTag) -> Result<()> {
        self.guard_mutation()?;
        match self.permissions.iter_mut().find(|p| p.resource == resource) {
            Some(entry) => {
                entry.actions.insert(action);
            }
            None => self.permissions.push(Permission::new(resource, [action])),
        }
        Ok(())
    }

    /// Removes `action` from `resource`. Entries left with no actions are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SystemRoleImmutable`] for system roles.
    pub fn revoke(&mut self, resource: ResourceTag, action: ActionTag) -> Result<()> {
        self.guard_mutation()?;
        if let Some(entry) = self.permissions.iter_mut().find(|p| p.resource == resource) {
            entry.actions.remove(&action);
        }
        self.permissions.retain(|p| !p.actions.is_empty());
        Ok(())
    }

    /// Replaces the whole permission set.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SystemRoleImmutable`] for system roles.
    pub fn set_permissions(&mut self, permissions: Vec<Permission>) -> Result<()> {
        self.guard_mutation()?;
        self.permissions = merge_permissions(permissions);
        Ok(())
    }

    /// Renames the role.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::SystemRoleImmutable`] for system roles.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        self.guard_mutation()?;
        self.name = name.into();
        Ok(())
    }
}

/// Returns `true` iff `role` has an entry for `resource` whose action set
/// contains `action`.
#[must_use]
pub fn can_perform(role: &Role, resource: ResourceTag, action: ActionTag) -> bool {
    role.permissions
        .iter()
        .any(|p| p.resource == resource && p.allows(action))
}

/// Collapses duplicate resource entries into the first one, unioning actions.
fn merge_permissions(permissions: Vec<Permission>) -> Vec<Permission> {
    let mut merged: Vec<Permission> = Vec::with_capacity(permissions.len());
    for permission in permissions {
        match merged.iter_mut().find(|p| p.resource == permission.resource) {
            Some(existing) => existing.actions.extend(permission.actions),
            None => merged.push(permission),
        }
    }
    merged
}

/// Create payload for a role. New roles are never system roles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// Update payload for a role.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RolePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}

impl Identified for Role {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}

impl Resource for Role {
    type Draft = RoleDraft;
    type Patch = RolePatch;
    type View = RoleView;

    const KIND: &'static str = "role";

    fn to_view(&self) -> RoleView {
        crate::ui::mapper::role_view(self)
    }

    fn ensure_mutable(view: &RoleView) -> Result<()> {
        if view.is_system {
            return Err(ConsoleError::SystemRoleImmutable {
                role: view.name.clone(),
            });
        }
        Ok(())
    }
}

impl Storable for Role {
    fn from_draft(id: u64, draft: RoleDraft, now: DateTime<Utc>) -> std::result::Result<Self, ServiceError> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::validation("Role name is required"));
        }
        Ok(Self {
            description: draft.description,
            user_count: Some(0),
            created_at: Some(now),
            ..Self::new(id, draft.name, draft.permissions)
        })
    }

    fn apply_patch(&mut self, patch: RolePatch, _now: DateTime<Utc>) -> std::result::Result<(), ServiceError> {
        if let Err(e) = self.guard_mutation() {
            return Err(ServiceError::validation(e.to_string()));
        }
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::validation("Role name is required"));
            }
            self.name = name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = merge_permissions(permissions);
        }
        Ok(())
    }

    fn before_delete(&self) -> std::result::Result<(), ServiceError> {
        self.guard_mutation()
            .map_err(|e| ServiceError::validation(e.to_string()))
    }
}
