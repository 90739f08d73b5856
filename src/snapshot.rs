//! In-memory transaction snapshot
//!
//! The client's copy of the backend's records. It is replaced wholesale on
//! load and patched after each successful create, edit or delete so the views
//! can refresh without another round trip.

use std::path::Path;

use log::{debug, info};

use crate::error::{FinboardError, FinboardResult};
use crate::models::{TransactionPatch, TransactionRecord};
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// Ordered list of records mirrored from the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSnapshot {
    records: Vec<TransactionRecord>,
}

impl TransactionSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// Read a JSON array of records from a file
    pub fn load(path: &Path) -> FinboardResult<Self> {
        let records: Vec<TransactionRecord> = read_json_required(path)?;
        debug!("loaded {} records from {}", records.len(), path.display());
        Ok(Self { records })
    }

    /// Write the records back as a JSON array
    pub fn save(&self, path: &Path) -> FinboardResult<()> {
        write_json_atomic(path, &self.records)
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TransactionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn position(&self, id: &str) -> FinboardResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| FinboardError::transaction_not_found(id))
    }

    /// Replace everything with a fresh load
    pub fn replace(&mut self, records: Vec<TransactionRecord>) {
        self.records = records;
    }

    /// Add a record the backend just created
    pub fn insert(&mut self, record: TransactionRecord) -> FinboardResult<()> {
        if self.get(&record.id).is_some() {
            return Err(FinboardError::Validation(format!(
                "Transaction already exists: {}",
                record.id
            )));
        }
        info!("snapshot: inserted {}", record.id);
        self.records.push(record);
        Ok(())
    }

    /// Swap in the backend's copy of an edited record
    pub fn apply(&mut self, updated: TransactionRecord) -> FinboardResult<()> {
        let i = self.position(&updated.id)?;
        info!("snapshot: updated {}", updated.id);
        self.records[i] = updated;
        Ok(())
    }

    /// Apply a partial update locally
    pub fn patch(&mut self, id: &str, patch: &TransactionPatch) -> FinboardResult<&TransactionRecord> {
        patch.validate()?;
        let i = self.position(id)?;
        patch.apply_to(&mut self.records[i]);
        info!("snapshot: patched {}", id);
        Ok(&self.records[i])
    }

    /// Drop a record the backend deleted
    pub fn remove(&mut self, id: &str) -> FinboardResult<TransactionRecord> {
        let i = self.position(id)?;
        info!("snapshot: removed {}", id);
        Ok(self.records.remove(i))
    }

    /// An id not used by any record, for records created without a backend
    pub fn next_local_id(&self) -> String {
        let mut n = self.records.len() + 1;
        loop {
            let candidate = format!("local-{}", n);
            if self.get(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}
