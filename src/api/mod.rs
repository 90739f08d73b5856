//! Sources of transaction records
//!
//! [`ApiClient`] talks to the backend over HTTP. [`FileBackend`] reads and
//! patches a local JSON file instead, for offline use.

pub mod client;
pub mod dto;
pub mod file;

pub use client::{http_client, ApiClient};
pub use dto::{LoggedUser, SignupRequest};
pub use file::FileBackend;

use crate::error::FinboardResult;
use crate::models::{NewTransaction, TransactionPatch, TransactionRecord};

/// Load and mutate the transaction list
pub trait TransactionBackend {
    fn fetch(&mut self) -> FinboardResult<Vec<TransactionRecord>>;

    /// Returns the record as stored, with its assigned id and timestamp
    fn create(&mut self, new: &NewTransaction) -> FinboardResult<TransactionRecord>;

    /// Send only the changed fields; returns the updated record
    fn edit(&mut self, id: &str, patch: &TransactionPatch) -> FinboardResult<TransactionRecord>;

    fn delete(&mut self, id: &str) -> FinboardResult<()>;
}
