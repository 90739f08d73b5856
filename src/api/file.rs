//! Offline backend over a local JSON array of records

use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;

use super::TransactionBackend;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{CreatedAt, NewTransaction, TransactionPatch, TransactionRecord};
use crate::snapshot::TransactionSnapshot;

/// Records kept in a file; every mutation rewrites the file
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    snapshot: TransactionSnapshot,
}

impl FileBackend {
    /// Open an existing record file
    pub fn open(path: impl Into<PathBuf>) -> FinboardResult<Self> {
        let path = path.into();
        let snapshot = TransactionSnapshot::load(&path)?;
        Ok(Self { path, snapshot })
    }

    /// Open a record file, starting empty if it does not exist yet
    pub fn open_or_create(path: impl Into<PathBuf>) -> FinboardResult<Self> {
        let path = path.into();
        if path.exists() {
            return Self::open(path);
        }
        debug!("starting new record file {}", path.display());
        Ok(Self {
            path,
            snapshot: TransactionSnapshot::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &TransactionSnapshot {
        &self.snapshot
    }

    /// Apply `change` to a copy of the snapshot and keep it once the file is written
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut TransactionSnapshot) -> FinboardResult<T>,
    ) -> FinboardResult<T> {
        let mut next = self.snapshot.clone();
        let out = change(&mut next)?;
        next.save(&self.path)?;
        self.snapshot = next;
        Ok(out)
    }
}

impl TransactionBackend for FileBackend {
    fn fetch(&mut self) -> FinboardResult<Vec<TransactionRecord>> {
        Ok(self.snapshot.records().to_vec())
    }

    fn create(&mut self, new: &NewTransaction) -> FinboardResult<TransactionRecord> {
        new.validate()?;
        let record = new
            .clone()
            .into_record(self.snapshot.next_local_id(), CreatedAt::from(Utc::now()));
        self.commit(|snapshot| snapshot.insert(record.clone()))?;
        Ok(record)
    }

    fn edit(&mut self, id: &str, patch: &TransactionPatch) -> FinboardResult<TransactionRecord> {
        if patch.is_empty() {
            return Err(FinboardError::Validation("no changes".into()));
        }
        self.commit(|snapshot| snapshot.patch(id, patch).cloned())
    }

    fn delete(&mut self, id: &str) -> FinboardResult<()> {
        self.commit(|snapshot| snapshot.remove(id).map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use tempfile::TempDir;

    fn new_expense(cents: i64) -> NewTransaction {
        let mut new = NewTransaction::new(TransactionKind::Expense, Money::from_cents(cents));
        new.description = "Coffee".into();
        new.category = "Food".into();
        new
    }

    #[test]
    fn test_create_edit_delete_persist() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");

        let mut backend = FileBackend::open_or_create(&path).unwrap();
        let created = backend.create(&new_expense(450)).unwrap();
        assert_eq!(created.id, "local-1");
        assert!(created.created_at.instant().is_some());

        let patch = TransactionPatch {
            amount: Some(Money::from_cents(500)),
            ..Default::default()
        };
        let edited = backend.edit(&created.id, &patch).unwrap();
        assert_eq!(edited.amount.cents(), 500);

        let mut reopened = FileBackend::open(&path).unwrap();
        let records = reopened.fetch().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.cents(), 500);
        assert_eq!(records[0].category.as_deref(), Some("Food"));

        reopened.delete(&created.id).unwrap();
        assert!(FileBackend::open(&path).unwrap().snapshot().is_empty());
    }

    #[test]
    fn test_missing_file_must_exist_for_open() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileBackend::open(temp_dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_unknown_id_and_empty_patch() {
        let temp_dir = TempDir::new().unwrap();
        let mut backend = FileBackend::open_or_create(temp_dir.path().join("r.json")).unwrap();

        assert!(backend.delete("nope").unwrap_err().is_not_found());
        let err = backend.edit("nope", &TransactionPatch::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_negative_amount_is_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("r.json");
        let mut backend = FileBackend::open_or_create(&path).unwrap();

        assert!(backend.create(&new_expense(-1)).unwrap_err().is_validation());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_write_leaves_snapshot_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("r.json");
        let mut backend = FileBackend::open_or_create(&path).unwrap();
        let created = backend.create(&new_expense(450)).unwrap();

        // A directory where the temp file goes makes every save fail
        let blocker = temp_dir.path().join("r.json.tmp");
        std::fs::create_dir(&blocker).unwrap();

        assert!(backend.create(&new_expense(100)).is_err());
        let patch = TransactionPatch {
            amount: Some(Money::from_cents(999)),
            ..Default::default()
        };
        assert!(backend.edit(&created.id, &patch).is_err());
        assert!(backend.delete(&created.id).is_err());

        assert_eq!(backend.snapshot().len(), 1);
        assert_eq!(backend.fetch().unwrap()[0].amount.cents(), 450);

        std::fs::remove_dir(&blocker).unwrap();
        let next = backend.create(&new_expense(100)).unwrap();
        assert_eq!(next.id, "local-2");
        assert_eq!(FileBackend::open(&path).unwrap().snapshot().len(), 2);
    }
}
