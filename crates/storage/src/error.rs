use std::path::PathBuf;

/// All errors that can be returned by a SubmissionStore implementation.
///
/// A missing or corrupt store document is not an error; see
/// [`crate::load_document`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store file exists but could not be read or written.
    #[error("store I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory document could not be encoded for persistence.
    #[error("failed to serialize store document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons a persisted document is rejected before recovery kicks in.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("store document is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("store document is not a JSON object")]
    NotAnObject,

    #[error("store document field `submissions` is not an array")]
    SubmissionsNotArray,
}
