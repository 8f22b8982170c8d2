//! Domain layer: entities, access rules, and errors.
//!
//! Everything here is independent of how screens hold state or how the
//! remote collaborator is reached.
//!
//! # Organization
//!
//! - [`entity`]: `Identified`, `Searchable`, and `Resource` traits
//! - [`course`], [`category`], [`badge`], [`role`]: CRUD-managed records
//! - [`audit`], [`leaderboard`]: read-only records
//! - [`error`]: error types and result alias

pub mod audit;
pub mod badge;
pub mod category;
pub mod course;
pub mod entity;
pub mod error;
pub mod leaderboard;
pub mod role;

pub use audit::{filter_logs, matches, AuditAction, AuditLogEntry, AuditResource, DateBound, FilterCriteria};
pub use badge::{Badge, BadgeDraft, BadgePatch};
pub use category::{Category, CategoryDraft, CategoryPatch};
pub use course::{Course, CourseDraft, CoursePatch, CourseStatus};
pub use entity::{FieldValue, Identified, Resource, Searchable};
pub use error::{ConsoleError, Result, ServiceError, GENERIC_ERROR_MESSAGE};
pub use leaderboard::LeaderboardEntry;
pub use role::{can_perform, ActionTag, Permission, ResourceTag, Role, RoleDraft, RolePatch};
