use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swift_service::QueryError;
use tokio::task::JoinError;

#[derive(Debug)]
pub enum ApiError {
    Query(QueryError),
    Join(JoinError),
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        ApiError::Query(e)
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        ApiError::Join(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Query(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Query(e) => {
                tracing::error!(error = %e, "query failed");
                internal()
            }
            ApiError::Join(e) => {
                tracing::error!(error = %e, "query task failed");
                internal()
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

// Store details stay in the log.
fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}
