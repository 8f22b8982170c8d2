//! Presentation layer: display shapes, display mappers, and view models.
//!
//! Rendering itself belongs to the caller. This layer only produces
//! display-ready data:
//!
//! ```text
//! Record → mapper → View → ListState → compute_viewmodel → ListViewModel
//! ```
//!
//! # Modules
//!
//! - [`views`]: Display shapes for each entity kind
//! - [`mapper`]: Pure backend-to-display mappers with placeholders
//! - [`viewmodel`]: Screen-level view model types

pub mod mapper;
pub mod viewmodel;
pub mod views;

pub use viewmodel::{DisplayRow, EmptyState, HeaderInfo, ListViewModel, SearchBarInfo};
pub use views::{AuditLogView, BadgeView, CategoryView, CourseView, LeaderboardView, RoleView};
