//! Application state.

use std::sync::Arc;

use sustainiq_storage::{IdGenerator, SubmissionStore};

/// Application state shared across request handlers.
pub(crate) struct AppState {
    /// Where submissions are recorded.
    pub(crate) store: Arc<dyn SubmissionStore>,
    /// Source of submission ids.
    pub(crate) ids: Box<dyn IdGenerator>,
}

impl AppState {
    pub(crate) fn new(store: Arc<dyn SubmissionStore>, ids: Box<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }
}
