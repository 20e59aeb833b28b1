// src/lfd/store.rs
use std::sync::Arc;

use super::record::{Record, RecordId};
use crate::app_log;
use crate::error::{DashboardError, DashboardResult};

/// In-memory collection of one record kind, in insertion order.
///
/// Every mutation swaps in a new `Arc`, so a holder of the previous value can tell
/// it changed with `Arc::ptr_eq`.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<Arc<R>>,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn all(&self) -> Vec<Arc<R>> {
        self.records.clone()
    }

    pub fn as_slice(&self) -> &[Arc<R>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<Arc<R>> {
        self.position(id).map(|idx| Arc::clone(&self.records[idx]))
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Sub-store holding only the records that pass `keep`, e.g. one job's applications.
    pub fn scoped<F>(&self, keep: F) -> Self
    where
        F: Fn(&R) -> bool,
    {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| keep(r))
                .cloned()
                .collect(),
        }
    }

    pub fn insert(&mut self, record: R) -> DashboardResult<Arc<R>> {
        if self.position(record.id()).is_some() {
            return Err(DashboardError::invalid(
                "id",
                format!("{} '{}' already exists", R::KIND, record.id()),
            ));
        }
        let record = Arc::new(record);
        self.records.push(Arc::clone(&record));
        Ok(record)
    }

    /// Replaces the stored record that has the same id.
    pub fn replace(&mut self, record: R) -> DashboardResult<Arc<R>> {
        let idx = self
            .position(record.id())
            .ok_or_else(|| DashboardError::not_found(R::KIND, record.id()))?;
        let record = Arc::new(record);
        self.records[idx] = Arc::clone(&record);
        Ok(record)
    }

    /// Fails with `NotFound` for an unknown id and `InvalidTransition` for a move the
    /// record kind forbids. Setting the current status again is a successful no-op.
    pub fn check_transition(&self, id: &RecordId, status: R::Status) -> DashboardResult<Arc<R>> {
        let current = self
            .get(id)
            .ok_or_else(|| DashboardError::not_found(R::KIND, id))?;

        if current.status() != status && !R::can_transition(current.status(), status) {
            return Err(DashboardError::InvalidTransition {
                kind: R::KIND,
                from: current.status().to_string(),
                to: status.to_string(),
            });
        }
        Ok(current)
    }

    pub fn update_status(&mut self, id: &RecordId, status: R::Status) -> DashboardResult<Arc<R>> {
        let current = self.check_transition(id, status)?;
        if current.status() == status {
            return Ok(current);
        }

        app_log!(
            info,
            "{} {} status {} -> {}",
            R::KIND,
            id,
            current.status(),
            status
        );
        self.replace(current.with_status(status))
    }
}
