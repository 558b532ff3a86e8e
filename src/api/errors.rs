use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Converts AppError into a `{statusCode, message}` JSON response.
///
/// Store and internal errors are logged in full and reported to the caller
/// with a generic message only.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = serde_json::json!({
            "statusCode": status.as_u16(),
            "message": self.public_message(),
        });

        (status, axum::Json(body)).into_response()
    }
}
