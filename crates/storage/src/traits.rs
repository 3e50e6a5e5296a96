use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::{StoreDocument, StoredSubmission, Submission};

/// The storage trait for recorded submissions.
///
/// A `SubmissionStore` holds one document, `{ submissions: [...] }`, kept
/// newest first. It is append-only: submissions are never updated or
/// deleted.
///
/// ## Write Semantics
///
/// `append` is a read-modify-write of the whole document. Implementations
/// are not required to serialize concurrent appends; two appends that
/// interleave may lose one of the submissions (last writer wins).
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be used in axum
/// application state and across async task boundaries.
#[async_trait]
pub trait SubmissionStore: Send + Sync + 'static {
    /// Read the current document.
    ///
    /// A store that does not exist yet, or whose content is corrupt, reads
    /// as empty.
    async fn read(&self) -> Result<StoreDocument, StorageError>;

    /// Insert `submission` at the head of the document and persist it.
    async fn append(&self, submission: Submission) -> Result<(), StorageError>;

    /// All entries, newest first. Unrecognized entries are included as-is.
    async fn list(&self) -> Result<Vec<StoredSubmission>, StorageError> {
        Ok(self.read().await?.submissions)
    }
}
