pub mod conformance;
mod document;
mod error;
mod file;
mod ids;
mod memory;
mod record;
mod traits;

pub use document::{encode_document, load_document, parse_document};
pub use error::{DocumentError, StorageError};
pub use file::{JsonFileStore, DEFAULT_DB_PATH};
pub use ids::{IdGenerator, SequentialIds, TimestampIds};
pub use memory::MemoryStore;
pub use record::{format_created_at, StoreDocument, StoredSubmission, Submission};
pub use traits::SubmissionStore;
