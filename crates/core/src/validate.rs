//! Payload validation for incoming snapshot submissions.

use serde::Serialize;
use serde_json::Value;

use crate::input::SnapshotInput;

/// Keys a submission must carry, in reporting order.
///
/// `industry` is collected by the form but not required here.
pub const REQUIRED_FIELDS: [&str; 3] = ["companySize", "trackMetrics", "challenge"];

/// One or more required keys were absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct MissingFields {
    pub missing: Vec<String>,
}

/// `null`, `false`, zero and the empty string count as absent.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text used for scoring. Non-string values keep their JSON rendering and
/// therefore never match the vocabulary.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn present<'a>(payload: &'a Value, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|v| !is_falsy(v))
}

/// Check the required keys and extract a [`SnapshotInput`].
///
/// No type or vocabulary checking happens here; unknown values pass
/// through and score with the fallback weight.
pub fn validate(payload: &Value) -> Result<SnapshotInput, MissingFields> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|key| present(payload, key).is_none())
        .map(|key| key.to_string())
        .collect();

    let (Some(company_size), Some(track_metrics), Some(challenge)) = (
        present(payload, "companySize"),
        present(payload, "trackMetrics"),
        present(payload, "challenge"),
    ) else {
        return Err(MissingFields { missing });
    };

    Ok(SnapshotInput {
        industry: present(payload, "industry").map(field_text),
        company_size: field_text(company_size).into(),
        track_metrics: field_text(track_metrics).into(),
        challenge: field_text(challenge).into(),
    })
}
