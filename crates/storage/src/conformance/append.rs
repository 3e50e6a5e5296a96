//! Append conformance tests.
//!
//! Verifies newest-first ordering, entry counts, and that stored
//! submissions come back exactly as written.

use std::future::Future;

use super::{ids_of, make_submission, TestResult};
use crate::{StoredSubmission, SubmissionStore};

/// Number of submissions appended by the counting test.
const N: usize = 12;

pub(super) async fn run_append_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "append",
            "append_then_read_returns_entry",
            append_then_read_returns_entry(factory).await,
        ),
        TestResult::from_result(
            "append",
            "appends_are_newest_first",
            appends_are_newest_first(factory).await,
        ),
        TestResult::from_result(
            "append",
            "n_appends_yield_n_entries",
            n_appends_yield_n_entries(factory).await,
        ),
        TestResult::from_result(
            "append",
            "append_preserves_extra_input_keys",
            append_preserves_extra_input_keys(factory).await,
        ),
        TestResult::from_result(
            "append",
            "duplicate_ids_are_both_kept",
            duplicate_ids_are_both_kept(factory).await,
        ),
    ]
}

async fn append_then_read_returns_entry<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let submission = make_submission("100", "51–200", "Somewhat", "Compliance / reporting");
    store
        .append(submission.clone())
        .await
        .map_err(|e| format!("append failed: {e}"))?;

    let expected = StoredSubmission::Recorded(submission);
    let doc = store.read().await.map_err(|e| format!("read failed: {e}"))?;
    match doc.submissions.as_slice() {
        [only] if *only == expected => Ok(()),
        [only] => Err(format!("stored submission differs: {only:?}")),
        other => Err(format!("expected 1 submission, found {}", other.len())),
    }
}

async fn appends_are_newest_first<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    for id in ["a", "b", "c"] {
        store
            .append(make_submission(id, "1–50", "Yes", "Data collection"))
            .await
            .map_err(|e| format!("append {id} failed: {e}"))?;
    }

    let listed = store.list().await.map_err(|e| format!("list failed: {e}"))?;
    let ids = ids_of(&listed);
    if ids != ["c", "b", "a"] {
        return Err(format!("expected [c, b, a], got {ids:?}"));
    }
    Ok(())
}

async fn n_appends_yield_n_entries<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    for i in 0..N {
        store
            .append(make_submission(&i.to_string(), "201+", "No", "Cost / operations"))
            .await
            .map_err(|e| format!("append {i} failed: {e}"))?;
    }

    let listed = store.list().await.map_err(|e| format!("list failed: {e}"))?;
    if listed.len() != N {
        return Err(format!("expected {N} submissions, found {}", listed.len()));
    }
    let expected: Vec<String> = (0..N).rev().map(|i| i.to_string()).collect();
    if ids_of(&listed) != expected {
        return Err("submissions are not in reverse insertion order".to_string());
    }
    Ok(())
}

async fn append_preserves_extra_input_keys<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let mut submission = make_submission("7", "1–50", "No", "Governance / ownership");
    submission.input["utmSource"] = serde_json::json!("newsletter");
    store
        .append(submission)
        .await
        .map_err(|e| format!("append failed: {e}"))?;

    let listed = store.list().await.map_err(|e| format!("list failed: {e}"))?;
    let source = listed
        .first()
        .and_then(StoredSubmission::as_submission)
        .and_then(|s| s.input.get("utmSource"))
        .and_then(|v| v.as_str());
    if source != Some("newsletter") {
        return Err(format!("extra input key lost, got {source:?}"));
    }
    Ok(())
}

async fn duplicate_ids_are_both_kept<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    for challenge in ["Data collection", "Targets / strategy"] {
        store
            .append(make_submission("1735689600000", "51–200", "Yes", challenge))
            .await
            .map_err(|e| format!("append failed: {e}"))?;
    }

    let listed = store.list().await.map_err(|e| format!("list failed: {e}"))?;
    if listed.len() != 2 {
        return Err(format!(
            "expected both same-millisecond submissions, found {}",
            listed.len()
        ));
    }
    let newest = listed[0].as_submission().map(|s| &s.input["challenge"]);
    if newest.and_then(|v| v.as_str()) != Some("Targets / strategy") {
        return Err("newest duplicate is not first".to_string());
    }
    Ok(())
}
