//! JSON file-backed resource service.
//!
//! [`JsonFileService`] plays the role of the remote backend for one resource
//! kind: it assigns ids and timestamps, validates drafts, and persists the
//! collection as human-readable JSON. Writes are atomic (write-to-temp +
//! rename), and a mutation is only committed to memory once it has reached
//! disk, so a failed write leaves the service unchanged.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "next_id": 3,
//!   "records": [
//!     { "id": 1, "name": "Design" },
//!     { "id": 2, "name": "Programming" }
//!   ]
//! }
//! ```
//!
//! Fixture files holding a bare array, or a `{ "data": [...] }` envelope as
//! returned by the backend, are accepted on open and rewritten in the format
//! above on the first mutation.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{envelope, DraftOf, PatchOf, RecordId, ResourceService};
use crate::domain::entity::{Identified, Resource};
use crate::domain::error::{ConsoleError, Result, ServiceError};

const FORMAT_VERSION: u32 = 1;

/// A record kind the file-backed service can store.
///
/// Implementors define the server-side rules: how a draft becomes a record,
/// how a patch is applied, and what may not be deleted.
pub trait Storable: Resource + Identified<Id = u64> + Serialize + DeserializeOwned {
    /// Builds a new record with a server-assigned id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the draft is incomplete.
    fn from_draft(id: u64, draft: Self::Draft, now: DateTime<Utc>) -> std::result::Result<Self, ServiceError>;

    /// Applies an update in place.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the patch is rejected. The
    /// record may be partially modified; the service discards it in that case.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> std::result::Result<(), ServiceError>;

    /// Checks that the record may be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if deletion is forbidden.
    fn before_delete(&self) -> std::result::Result<(), ServiceError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData<R> {
    version: u32,
    next_id: u64,
    #[serde(default = "Vec::new")]
    records: Vec<R>,
}

impl<R: Storable> StoreData<R> {
    fn from_records(records: Vec<R>) -> Result<Self> {
        let mut data = Self {
            version: FORMAT_VERSION,
            next_id: 1,
            records,
        };
        data.fix_next_id()?;
        Ok(data)
    }

    /// Raises `next_id` above every stored id.
    ///
    /// Fails when the largest id leaves no room for another record.
    fn fix_next_id(&mut self) -> Result<()> {
        let max_id = self.records.iter().map(|r| *r.id()).max().unwrap_or(0);
        let after_max = max_id.checked_add(1).ok_or_else(|| {
            ConsoleError::Storage(format!("{} id {max_id} leaves no room for new records", R::KIND))
        })?;
        self.next_id = self.next_id.max(after_max);
        Ok(())
    }

    /// Hands out the next id and advances the counter.
    fn allocate_id(&mut self) -> std::result::Result<u64, ServiceError> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| ServiceError::server(format!("{} ids exhausted", R::KIND)))?;
        Ok(id)
    }

    fn position(&self, id: u64) -> std::result::Result<usize, ServiceError> {
        self.records
            .iter()
            .position(|r| *r.id() == id)
            .ok_or_else(|| ServiceError::not_found(format!("{} {id} not found", R::KIND)))
    }
}

/// File-backed [`ResourceService`] for one record kind.
pub struct JsonFileService<R> {
    file_path: PathBuf,
    data: Mutex<StoreData<R>>,
}

impl<R: Storable> JsonFileService<R> {
    /// Opens the file at `path`, or starts empty if it does not exist.
    ///
    /// Parent directories are created on first write, not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if its largest id leaves no room for new records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = path.into();
        let _span = tracing::debug_span!("json_service_open", kind = R::KIND, path = ?file_path).entered();

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("file missing, starting empty");
            StoreData::from_records(Vec::new())?
        };

        tracing::debug!(records = data.records.len(), next_id = data.next_id, "service opened");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    /// Creates a service holding `records` and writes them to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written, or if the largest id
    /// leaves no room for new records.
    pub fn with_records(path: impl Into<PathBuf>, records: Vec<R>) -> Result<Self> {
        let file_path = path.into();
        let data = StoreData::from_records(records)?;
        save_to_file(&file_path, &data).map_err(|e| ConsoleError::Storage(e.to_string()))?;
        Ok(Self {
            file_path,
            data: Mutex::new(data),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreData<R>> {
        let contents = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(|e| ConsoleError::Storage(format!("failed to parse JSON: {e}")))?;

        if value.get("records").is_some() {
            let mut data: StoreData<R> = serde_json::from_value(value)
                .map_err(|e| ConsoleError::Storage(format!("invalid {} store: {e}", R::KIND)))?;
            data.fix_next_id()?;
            tracing::debug!(version = data.version, "loaded store file");
            return Ok(data);
        }

        let records: Vec<R> = envelope::unwrap_list(value).map_err(|e| ConsoleError::Storage(e.to_string()))?;
        tracing::debug!(records = records.len(), "loaded fixture file");
        StoreData::from_records(records)
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, StoreData<R>>, ServiceError> {
        self.data
            .lock()
            .map_err(|_| ServiceError::server("storage lock poisoned"))
    }

    /// Applies `change` to a copy of the data, persists it, then commits it.
    fn commit<T>(
        &self,
        change: impl FnOnce(&mut StoreData<R>) -> std::result::Result<T, ServiceError>,
    ) -> std::result::Result<T, ServiceError> {
        let mut guard = self.lock()?;
        let mut next = (*guard).clone();
        let value = change(&mut next)?;
        save_to_file(&self.file_path, &next)?;
        *guard = next;
        Ok(value)
    }
}

fn save_to_file<R: Serialize>(path: &Path, data: &StoreData<R>) -> std::result::Result<(), ServiceError> {
    tracing::debug!(path = ?path, "saving store file");

    let json = serde_json::to_string_pretty(data).map_err(|e| ServiceError::server(format!("failed to serialize JSON: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ServiceError::server(format!("failed to create directory: {e}")))?;
    }

    let tmp_path = path.with_extension("tmp");
    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, json).map_err(|e| ServiceError::server(format!("failed to write store: {e}")))?;

    tracing::trace!("renaming temporary file to final location");
    std::fs::rename(&tmp_path, path).map_err(|e| ServiceError::server(format!("failed to replace store: {e}")))?;

    Ok(())
}

#[async_trait]
impl<R: Storable> ResourceService for JsonFileService<R> {
    type Record = R;

    async fn list(&self) -> std::result::Result<Vec<R>, ServiceError> {
        let data = self.lock().map_err(|e| ServiceError::Fetch(e.message().map(String::from)))?;
        Ok(data.records.clone())
    }

    async fn create(&self, draft: DraftOf<Self>) -> std::result::Result<R, ServiceError> {
        self.commit(|data| {
            let id = data.allocate_id()?;
            let record = R::from_draft(id, draft, Utc::now())?;
            data.records.push(record.clone());
            tracing::debug!(kind = R::KIND, id = *record.id(), "record stored");
            Ok(record)
        })
    }

    async fn update(&self, id: &RecordId<Self>, patch: PatchOf<Self>) -> std::result::Result<R, ServiceError> {
        self.commit(|data| {
            let index = data.position(*id)?;
            let record = &mut data.records[index];
            record.apply_patch(patch, Utc::now())?;
            Ok(record.clone())
        })
    }

    async fn delete(&self, id: &RecordId<Self>) -> std::result::Result<(), ServiceError> {
        self.commit(|data| {
            let index = data.position(*id)?;
            data.records[index].before_delete()?;
            data.records.remove(index);
            Ok(())
        })
    }
}
