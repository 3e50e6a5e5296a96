//! Decoding the persisted store document.
//!
//! Corruption is handled by discarding data: [`load_document`] turns any
//! rejected document into an empty store. Callers that need to know why
//! a document was rejected use [`parse_document`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::DocumentError;
use crate::record::{StoreDocument, StoredSubmission, Submission};

/// Strictly decode a store document.
///
/// The document must be a JSON object whose `submissions` field is an
/// array. Array entries that do not decode as a [`Submission`] are kept
/// as raw JSON in their original position, so a later write preserves them.
pub fn parse_document(bytes: &[u8]) -> Result<StoreDocument, DocumentError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Object(mut fields) = value else {
        return Err(DocumentError::NotAnObject);
    };
    let Some(Value::Array(entries)) = fields.remove("submissions") else {
        return Err(DocumentError::SubmissionsNotArray);
    };

    let submissions = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match Submission::deserialize(&entry) {
            Ok(submission) => StoredSubmission::Recorded(submission),
            Err(e) => {
                tracing::warn!(index, error = %e, "keeping unrecognized submission as raw JSON");
                StoredSubmission::Unrecognized(entry)
            }
        })
        .collect();

    Ok(StoreDocument { submissions })
}

/// Decode a store document, falling back to an empty store.
///
/// Rejected content is lost on the next write.
pub fn load_document(bytes: &[u8]) -> StoreDocument {
    parse_document(bytes).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "store document rejected, starting from an empty store");
        StoreDocument::default()
    })
}

/// Encode a document for persistence: pretty-printed, two-space indent.
pub fn encode_document(document: &StoreDocument) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(document)
}
