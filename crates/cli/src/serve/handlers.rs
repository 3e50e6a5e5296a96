//! HTTP route handlers: health, snapshot submission, history.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use sustainiq_core::{compute, validate, SnapshotResult, SERVICE_NAME};
use sustainiq_storage::{format_created_at, StoredSubmission, Submission};
use time::OffsetDateTime;

use super::error::ApiError;
use super::json_error;
use super::state::AppState;

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, "not found")
}

/// GET /api/health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "ok": true,
        "service": SERVICE_NAME,
        "time": format_created_at(OffsetDateTime::now_utc()),
    });
    (StatusCode::OK, Json(response))
}

/// Whether the request declares a JSON body. Parameters such as
/// `charset` are ignored.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

/// Decode a request body. An empty body is an empty object, so it fails
/// validation rather than parsing.
fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body)
}

/// The submitted payload. Bodies not declared as `application/json` are
/// not parsed and read as an empty object.
fn read_payload(headers: &HeaderMap, body: &[u8]) -> Result<Value, serde_json::Error> {
    if !is_json_content_type(headers) {
        tracing::debug!("ignoring body without a JSON content type");
        return Ok(Value::Object(serde_json::Map::new()));
    }
    parse_body(body)
}

/// POST /api/snapshot
pub(crate) async fn handle_create_snapshot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SnapshotResult>, ApiError> {
    let payload = read_payload(&headers, &body?)?;
    let input = validate(&payload).inspect_err(|e| {
        tracing::info!(missing = ?e.missing, "rejected snapshot with missing fields");
    })?;

    let result = compute(&input);
    let submission = Submission::new(
        state.ids.as_ref(),
        OffsetDateTime::now_utc(),
        payload,
        result.clone(),
    );
    let id = submission.id.clone();
    state.store.append(submission).await?;

    tracing::info!(%id, score = result.score, stage = result.stage, "snapshot recorded");
    Ok(Json(result))
}

/// GET /api/snapshots
pub(crate) async fn handle_list_snapshots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredSubmission>>, ApiError> {
    Ok(Json(state.store.list().await?))
}
