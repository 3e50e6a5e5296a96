//! Read conformance tests.

use std::future::Future;

use super::{make_submission, TestResult};
use crate::SubmissionStore;

pub(super) async fn run_read_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "read",
            "fresh_store_reads_empty",
            fresh_store_reads_empty(factory).await,
        ),
        TestResult::from_result(
            "read",
            "fresh_store_lists_empty",
            fresh_store_lists_empty(factory).await,
        ),
        TestResult::from_result(
            "read",
            "reads_are_repeatable",
            reads_are_repeatable(factory).await,
        ),
        TestResult::from_result(
            "read",
            "list_matches_read",
            list_matches_read(factory).await,
        ),
    ]
}

async fn fresh_store_reads_empty<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let doc = store.read().await.map_err(|e| format!("read failed: {e}"))?;
    if !doc.submissions.is_empty() {
        return Err(format!(
            "expected empty store, found {} submissions",
            doc.submissions.len()
        ));
    }
    Ok(())
}

async fn fresh_store_lists_empty<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    let listed = store.list().await.map_err(|e| format!("list failed: {e}"))?;
    if !listed.is_empty() {
        return Err(format!("expected empty list, found {}", listed.len()));
    }
    Ok(())
}

async fn reads_are_repeatable<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    store
        .append(make_submission("1", "1–50", "No", "Data collection"))
        .await
        .map_err(|e| format!("append failed: {e}"))?;

    let first = store.read().await.map_err(|e| format!("read failed: {e}"))?;
    let second = store.read().await.map_err(|e| format!("read failed: {e}"))?;
    if first != second {
        return Err("two reads without a write returned different documents".to_string());
    }
    Ok(())
}

async fn list_matches_read<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: SubmissionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let store = factory().await;
    for id in ["1", "2"] {
        store
            .append(make_submission(id, "201+", "Yes", "Targets / strategy"))
            .await
            .map_err(|e| format!("append failed: {e}"))?;
    }

    let doc = store.read().await.map_err(|e| format!("read failed: {e}"))?;
    let listed = store.list().await.map_err(|e| format!("list failed: {e}"))?;
    if doc.submissions != listed {
        return Err("list() disagrees with read().submissions".to_string());
    }
    Ok(())
}
