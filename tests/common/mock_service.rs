//! In-memory resource service with failure injection.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use coursedesk::domain::{Identified, ServiceError};
use coursedesk::service::{DraftOf, Operation, PatchOf, RecordId, ResourceService, Storable};

/// Applies the same record rules as the file-backed service, without disk.
///
/// Every call is logged, and failures can be queued per operation. A queued
/// failure is consumed by the next call of that operation.
pub struct MockService<R> {
    records: Mutex<Vec<R>>,
    next_id: Mutex<u64>,
    failures: Mutex<HashMap<Operation, VecDeque<ServiceError>>>,
    calls: Mutex<Vec<Operation>>,
}

impl<R: Storable> MockService<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seeds the collection. Duplicate ids are kept as given, so list
    /// responses can be made to repeat an id.
    pub fn with_records(records: Vec<R>) -> Self {
        let next_id = records.iter().map(|r| *r.id()).max().unwrap_or(0) + 1;
        Self {
            records: Mutex::new(records),
            next_id: Mutex::new(next_id),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: Operation, error: ServiceError) {
        self.failures
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<Operation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls().iter().filter(|op| **op == operation).count()
    }

    /// Snapshot of the server-side collection.
    pub fn records(&self) -> Vec<R> {
        self.records.lock().unwrap().clone()
    }

    fn enter(&self, operation: Operation) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(operation);
        match self
            .failures
            .lock()
            .unwrap()
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn position(records: &[R], id: u64) -> Result<usize, ServiceError> {
        records
            .iter()
            .position(|r| *r.id() == id)
            .ok_or_else(|| ServiceError::not_found(format!("{} {id} not found", R::KIND)))
    }
}

/// Fixed server clock so mapped views are stable across runs.
fn server_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).single().unwrap()
}

#[async_trait]
impl<R: Storable> ResourceService for MockService<R> {
    type Record = R;

    async fn list(&self) -> Result<Vec<R>, ServiceError> {
        self.enter(Operation::List)?;
        Ok(self.records())
    }

    async fn create(&self, draft: DraftOf<Self>) -> Result<R, ServiceError> {
        self.enter(Operation::Create)?;
        let mut next_id = self.next_id.lock().unwrap();
        let record = R::from_draft(*next_id, draft, server_now())?;
        *next_id += 1;
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId<Self>, patch: PatchOf<Self>) -> Result<R, ServiceError> {
        self.enter(Operation::Update)?;
        let mut records = self.records.lock().unwrap();
        let index = Self::position(&records, *id)?;
        let mut updated = records[index].clone();
        updated.apply_patch(patch, server_now())?;
        records[index] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &RecordId<Self>) -> Result<(), ServiceError> {
        self.enter(Operation::Delete)?;
        let mut records = self.records.lock().unwrap();
        let index = Self::position(&records, *id)?;
        records[index].before_delete()?;
        records.remove(index);
        Ok(())
    }
}
