//! Remote resource service abstraction.
//!
//! This module defines [`ResourceService`], the collaborator a list screen
//! talks to. Business logic never depends on a concrete transport: the
//! synchronizer only sees the four CRUD calls and their [`ServiceError`]s.
//!
//! # Modules
//!
//! - [`messages`]: Request/response types and trace context propagation
//! - [`dispatch`]: Executes a request against a service
//! - [`envelope`]: Normalizes backend payload shapes
//! - [`json`]: File-backed service used by the CLI and tests

pub mod dispatch;
pub mod envelope;
pub mod json;
pub mod messages;

pub use dispatch::execute;
pub use json::{JsonFileService, Storable};
pub use messages::{Operation, ServiceRequest, ServiceResponse, TraceContext};

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entity::{Identified, Resource};
use crate::domain::error::ServiceError;

/// Identifier type of a service's records.
pub type RecordId<S> = <<S as ResourceService>::Record as Identified>::Id;

/// Create payload of a service's records.
pub type DraftOf<S> = <<S as ResourceService>::Record as Resource>::Draft;

/// Update payload of a service's records.
pub type PatchOf<S> = <<S as ResourceService>::Record as Resource>::Patch;

/// Display shape of a service's records.
pub type ViewOf<S> = <<S as ResourceService>::Record as Resource>::View;

/// CRUD collaborator for one resource kind.
///
/// Returned records are the server's canonical copies: ids and timestamps
/// assigned by the server are authoritative.
///
/// # Examples
///
/// ```no_run
/// use coursedesk::domain::Category;
/// use coursedesk::service::{JsonFileService, ResourceService};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let service: JsonFileService<Category> = JsonFileService::open("/tmp/categories.json")?;
/// let categories = service.list().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Record type managed by this service.
    type Record: Resource;

    /// Fetches the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Fetch`] on transport or server failure.
    async fn list(&self) -> Result<Vec<Self::Record>, ServiceError>;

    /// Creates a record from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the draft is rejected.
    async fn create(&self, draft: DraftOf<Self>) -> Result<Self::Record, ServiceError>;

    /// Updates the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no such record exists.
    async fn update(&self, id: &RecordId<Self>, patch: PatchOf<Self>) -> Result<Self::Record, ServiceError>;

    /// Deletes the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no such record exists.
    async fn delete(&self, id: &RecordId<Self>) -> Result<(), ServiceError>;
}

#[async_trait]
impl<S: ResourceService + ?Sized> ResourceService for Arc<S> {
    type Record = S::Record;

    async fn list(&self) -> Result<Vec<Self::Record>, ServiceError> {
        (**self).list().await
    }

    async fn create(&self, draft: DraftOf<Self>) -> Result<Self::Record, ServiceError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &RecordId<Self>, patch: PatchOf<Self>) -> Result<Self::Record, ServiceError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &RecordId<Self>) -> Result<(), ServiceError> {
        (**self).delete(id).await
    }
}
