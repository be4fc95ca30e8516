use async_trait::async_trait;
use contact_form_server::error::{StorageError, StorageResult};
use contact_form_server::models::{ContactSubmission, ContactType};
use contact_form_server::storage::ContactStore;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact store for testing.
///
/// Keeps saved submissions in memory and can be switched into a failing
/// mode to exercise the server error path.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactStore {
    saved: Arc<Mutex<Vec<ContactSubmission>>>,
    failing: Arc<AtomicBool>,
    save_calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockContactStore {
    /// Create a new empty MockContactStore.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every save fails.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Submissions saved so far, in order.
    pub fn saved(&self) -> Vec<ContactSubmission> {
        self.saved.lock().unwrap().clone()
    }

    /// Saved submissions of one contact type.
    pub fn saved_of(&self, contact_type: ContactType) -> Vec<ContactSubmission> {
        self.saved()
            .into_iter()
            .filter(|submission| submission.contact_type() == contact_type)
            .collect()
    }

    /// Number of times `save` was called, successful or not.
    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactStore for MockContactStore {
    async fn save(&self, submission: &ContactSubmission) -> StorageResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                path: "mock.csv".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }

        self.saved.lock().unwrap().push(submission.clone());
        Ok(())
    }
}
