//! In-process store, for tests and throwaway runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::{StoreDocument, Submission};
use crate::traits::SubmissionStore;

/// A [`SubmissionStore`] that keeps the document in memory.
///
/// Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<StoreDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `document`.
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn read(&self) -> Result<StoreDocument, StorageError> {
        Ok(self.document.read().await.clone())
    }

    async fn append(&self, submission: Submission) -> Result<(), StorageError> {
        self.document.write().await.prepend(submission);
        Ok(())
    }
}
