use serde::{Deserialize, Serialize};
use sustainiq_core::SnapshotResult;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::ids::IdGenerator;

/// One recorded assessment. Written once, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Submission {
    pub id: String,
    /// UTC timestamp with millisecond precision, e.g. `2025-01-01T09:30:00.000Z`.
    pub created_at: String,
    /// The accepted payload exactly as posted, extra keys included.
    pub input: serde_json::Value,
    pub result: SnapshotResult,
}

impl Submission {
    /// Record a submission taken at `at`, with an id from `ids`.
    pub fn new(
        ids: &dyn IdGenerator,
        at: OffsetDateTime,
        input: serde_json::Value,
        result: SnapshotResult,
    ) -> Self {
        Self {
            id: ids.next_id(at),
            created_at: format_created_at(at),
            input,
            result,
        }
    }
}

/// Format a timestamp the way `createdAt` is persisted.
pub fn format_created_at(at: OffsetDateTime) -> String {
    let at = at.to_offset(time::UtcOffset::UTC);
    at.format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
    .unwrap_or_else(|_| "unknown".to_string())
}

/// One entry of the persisted `submissions` array.
///
/// Entries written under an older or foreign shape do not decode as a
/// [`Submission`]; they are kept as raw JSON and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredSubmission {
    Recorded(Submission),
    Unrecognized(serde_json::Value),
}

impl StoredSubmission {
    pub fn as_submission(&self) -> Option<&Submission> {
        match self {
            Self::Recorded(submission) => Some(submission),
            Self::Unrecognized(_) => None,
        }
    }

    /// The entry's `id`, when it has a string one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Recorded(submission) => Some(&submission.id),
            Self::Unrecognized(value) => value.get("id").and_then(|v| v.as_str()),
        }
    }
}

impl From<Submission> for StoredSubmission {
    fn from(submission: Submission) -> Self {
        Self::Recorded(submission)
    }
}

/// The whole persisted store: every submission, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub submissions: Vec<StoredSubmission>,
}

impl StoreDocument {
    /// Insert at the head, keeping newest-first order.
    pub fn prepend(&mut self, submission: Submission) {
        self.submissions.insert(0, submission.into());
    }
}
