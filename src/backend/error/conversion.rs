/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers and middleware can return
 * it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "Error message",
 *   "error": "internal detail, development only"
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::backend::error::types::BackendError;

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&BackendError> for ErrorBody {
    fn from(err: &BackendError) -> Self {
        ErrorBody {
            success: false,
            message: err.message(),
            error: err.detail().map(str::to_string),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
