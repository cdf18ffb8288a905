use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use service::errors::ServiceError;

/// JSON error reply: a status code plus a `{"message": ...}` body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "message": message.into() }) }
    }

    /// Body shaped as `{"success": false, "message": ...}`, used by member update.
    pub fn unsuccessful(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "success": false, "message": message.into() }) }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::AlreadyRecorded => JsonApiError::new(StatusCode::BAD_REQUEST, ServiceError::AlreadyRecorded.to_string()),
            ServiceError::Db(msg) => {
                error!(error = %msg, "database call failed");
                JsonApiError::internal()
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, body = %self.body, "request failed");
        }
        (self.status, Json(self.body)).into_response()
    }
}
