//! CSV file storage for contact submissions.

use super::ContactStore;
use crate::error::{StorageError, StorageResult};
use crate::models::{ContactSubmission, ContactType};
use async_trait::async_trait;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Format of the leading `timestamp` column (server local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Appends submissions to `persons.csv` / `companies.csv` in a directory.
///
/// A file gets its header row on the first append that finds it empty. Each
/// append encodes the whole chunk in memory and writes it in one call, and
/// appends from the same store never run concurrently.
#[derive(Debug, Clone)]
pub struct CsvContactStore {
    directory: PathBuf,
    append_lock: Arc<Mutex<()>>,
}

impl CsvContactStore {
    /// Create a store writing under `directory`. Nothing touches the disk
    /// until the first save.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the CSV file holding one contact type.
    pub fn file_path(&self, contact_type: ContactType) -> PathBuf {
        let stem = match contact_type {
            ContactType::Person => "persons",
            ContactType::Company => "companies",
        };
        self.directory.join(format!("{}.csv", stem))
    }

    fn ensure_directory(&self) -> StorageResult<()> {
        if self.directory.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.directory).map_err(|source| StorageError::CreateDirectory {
            path: self.directory.clone(),
            source,
        })?;
        debug!("Created contacts directory {}", self.directory.display());
        Ok(())
    }

    /// Blocking append of one submission stamped with `timestamp`.
    ///
    /// The file handle is dropped, and therefore closed, on every return path.
    pub fn append(&self, submission: &ContactSubmission, timestamp: &str) -> StorageResult<()> {
        self.ensure_directory()?;

        let path = self.file_path(submission.contact_type());
        let open_error = |source| StorageError::OpenFile {
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_error)?;
        let is_new = file.metadata().map_err(open_error)?.len() == 0;

        let header = is_new.then(|| submission.csv_header());
        let chunk = encode(header, &submission.csv_record(timestamp))?;

        file.write_all(&chunk)
            .and_then(|_| file.flush())
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        info!(
            contact_type = %submission.contact_type(),
            header_written = is_new,
            "Appended contact to {}",
            path.display()
        );
        Ok(())
    }
}

/// Encode an optional header row and one data row as CSV bytes.
fn encode(header: Option<&[&str]>, record: &[&str]) -> StorageResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if let Some(header) = header {
        writer
            .write_record(header)
            .map_err(|e| StorageError::Encode(e.to_string()))?;
    }
    writer
        .write_record(record)
        .map_err(|e| StorageError::Encode(e.to_string()))?;

    writer
        .into_inner()
        .map_err(|e| StorageError::Encode(e.to_string()))
}

#[async_trait]
impl ContactStore for CsvContactStore {
    async fn save(&self, submission: &ContactSubmission) -> StorageResult<()> {
        let _guard = self.append_lock.lock().await;

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let store = self.clone();
        let submission = submission.clone();

        tokio::task::spawn_blocking(move || store.append(&submission, &timestamp))
            .await
            .map_err(|e| StorageError::Task(format!("Task join error: {}", e)))?
    }
}
