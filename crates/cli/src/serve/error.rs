//! Request-level errors and their JSON responses.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sustainiq_core::MissingFields;
use sustainiq_storage::StorageError;

use super::json_error;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("failed to read request body: {}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Body(rejection) => {
                tracing::info!(status = %rejection.status(), "rejected request body");
                json_error(rejection.status(), &rejection.body_text()).into_response()
            }
            ApiError::InvalidJson(e) => {
                json_error(StatusCode::BAD_REQUEST, &format!("invalid JSON body: {e}"))
                    .into_response()
            }
            ApiError::MissingFields(MissingFields { missing }) => {
                let body = serde_json::json!({
                    "error": "Missing required fields",
                    "missing": missing,
                });
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "store operation failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to access snapshot store")
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, Bytes};
    use axum::extract::FromRequest;
    use axum::http::{header, Request};

    use super::*;

    #[tokio::test]
    async fn oversized_body_maps_to_json_payload_too_large() {
        // Larger than the extractor's default 2 MB limit.
        let request = Request::new(Body::from(vec![b'a'; 3 * 1024 * 1024]));
        let rejection = Bytes::from_request(request, &()).await.unwrap_err();

        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[test]
    fn missing_fields_map_to_bad_request() {
        let err = ApiError::from(MissingFields {
            missing: vec!["companySize".to_string()],
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_json_maps_to_bad_request() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let response = ApiError::from(parse_error).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failure_maps_to_internal_error() {
        let err = ApiError::from(StorageError::Io {
            path: "db.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
