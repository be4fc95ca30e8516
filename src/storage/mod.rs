//! Contact persistence.
//!
//! The [`ContactStore`] trait abstracts where accepted submissions go so the
//! HTTP layer can be tested against an in-memory store. The production
//! implementation appends CSV rows to one file per contact type.

mod csv_store;

pub use csv_store::CsvContactStore;

use crate::error::StorageResult;
use crate::models::ContactSubmission;
use async_trait::async_trait;

/// Append-only sink for validated submissions.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist one submission. Nothing is written when an error is returned.
    async fn save(&self, submission: &ContactSubmission) -> StorageResult<()>;
}
