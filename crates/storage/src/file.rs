//! Single JSON document on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::document::{encode_document, load_document};
use crate::error::StorageError;
use crate::record::{StoreDocument, Submission};
use crate::traits::SubmissionStore;

/// Default store file name, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "db.json";

/// A [`SubmissionStore`] backed by one pretty-printed JSON file.
///
/// Every append rewrites the whole file in place. There is no locking and
/// no atomic rename, so a crash mid-write can leave a truncated file (which
/// then reads as empty) and concurrent appends can lose an update.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn write(&self, document: &StoreDocument) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        let bytes = encode_document(document)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| self.io_error(e))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

#[async_trait]
impl SubmissionStore for JsonFileStore {
    async fn read(&self) -> Result<StoreDocument, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(load_document(&bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreDocument::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn append(&self, submission: Submission) -> Result<(), StorageError> {
        let mut document = self.read().await?;
        tracing::debug!(
            id = %submission.id,
            existing = document.submissions.len(),
            path = %self.path.display(),
            "appending submission"
        );
        document.prepend(submission);
        self.write(&document).await
    }
}
