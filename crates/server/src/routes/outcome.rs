//! Tagged JSON results for AJAX endpoints.
//!
//! Wire shape:
//! - success: `{"success": true, ...payload fields}`
//! - failure: `{"success": false, "error": "<reason>"}`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Result of a JSON endpoint.
#[derive(Debug)]
pub enum ApiOutcome<T = ()> {
    /// The operation completed. Object payloads are merged into the body.
    Success(T),
    /// The operation failed with a client-safe reason.
    Failure { status: StatusCode, reason: String },
}

impl<T> ApiOutcome<T> {
    /// A `400 Bad Request` failure.
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::Failure {
            status: StatusCode::BAD_REQUEST,
            reason: reason.into(),
        }
    }

    /// A `401 Unauthorized` failure.
    pub fn unauthorized() -> Self {
        Self::Failure {
            status: StatusCode::UNAUTHORIZED,
            reason: "Unauthorized".to_string(),
        }
    }

    /// Report a server-side error and answer `500` with a generic reason.
    ///
    /// The error detail is logged, never sent to the caller.
    pub fn server_error(err: &AppError, reason: impl Into<String>) -> Self {
        err.report("JSON request error");
        Self::Failure {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            reason: reason.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiOutcome<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Success(payload) => {
                let mut body = match serde_json::to_value(payload) {
                    Ok(Value::Object(fields)) => fields,
                    Ok(_) => Map::new(),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialize response payload");
                        return failure_body(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "Internal server error",
                        );
                    }
                };
                body.insert("success".to_string(), Value::Bool(true));
                (StatusCode::OK, Json(Value::Object(body))).into_response()
            }
            Self::Failure { status, reason } => failure_body(status, &reason),
        }
    }
}

fn failure_body(status: StatusCode, reason: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "success": false, "error": reason })),
    )
        .into_response()
}
