//! Server-side failures.
//!
//! Client mistakes never become an `AppError`: malformed bodies and ids are
//! answered by [`crate::routes::outcome::ApiOutcome::bad_request`], and a
//! denied session by the access guard's own rejection. What remains is the
//! server's fault, so every variant is reported and answered with a `500`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Record store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    /// Log the error and report it to Sentry.
    pub fn report(&self, context: &'static str) {
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "{context}"
        );
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.report("Request error");

        // Don't expose internal error details to clients
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
