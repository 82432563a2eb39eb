//! Public feedback submission.

use axum::extract::{FromRequest, Request, State};
use serde::Serialize;
use tracing::instrument;

use feedback_desk_core::FeedbackId;

use super::body::JsonOrForm;
use super::outcome::ApiOutcome;
use crate::error::AppError;
use crate::models::NewFeedback;
use crate::state::AppState;

/// Payload of a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmittedFeedback {
    pub id: FeedbackId,
}

/// A feedback submission validated at the boundary.
///
/// Accepts a JSON body (the form's AJAX call) or a urlencoded body (plain
/// HTML form post). Every field is required; `rating` must be a whole number
/// or numeric text. Anything else is a `400` with a JSON reason.
#[derive(Debug)]
pub struct FeedbackSubmission(pub NewFeedback);

impl<S> FromRequest<S> for FeedbackSubmission
where
    S: Send + Sync,
{
    type Rejection = ApiOutcome;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        JsonOrForm::<NewFeedback>::from_request(req, state)
            .await
            .map(|JsonOrForm(input)| Self(input))
            .map_err(|rejection| {
                ApiOutcome::bad_request(format!("Invalid feedback: {}", rejection.detail()))
            })
    }
}

/// Submit feedback.
///
/// POST /feedback
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    FeedbackSubmission(input): FeedbackSubmission,
) -> ApiOutcome<SubmittedFeedback> {
    match state.feedback().create(input).await {
        Ok(feedback) => {
            tracing::info!(
                feedback_id = %feedback.id,
                rating = %feedback.rating,
                "Feedback submitted"
            );
            ApiOutcome::Success(SubmittedFeedback { id: feedback.id })
        }
        Err(e) => ApiOutcome::server_error(&AppError::from(e), "Error submitting feedback"),
    }
}
