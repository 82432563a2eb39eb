//! Admin dashboard: feedback listing and deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use feedback_desk_core::FeedbackId;

use super::outcome::ApiOutcome;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireAdmin, RequireAdminAction};
use crate::models::Feedback;
use crate::state::AppState;

/// Feedback row view for templates.
#[derive(Debug, Clone)]
pub struct FeedbackView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub comments: String,
    pub submitted_at: String,
}

impl From<&Feedback> for FeedbackView {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.to_string(),
            name: feedback.name.clone(),
            email: feedback.email.clone(),
            rating: feedback.rating.value(),
            comments: feedback.comments.clone(),
            submitted_at: feedback.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub feedbacks: Vec<FeedbackView>,
}

/// Dashboard page handler.
///
/// GET /dashboard
#[instrument(skip_all)]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> Response {
    match state.feedback().list_newest_first().await {
        Ok(records) => DashboardTemplate {
            feedbacks: records.iter().map(FeedbackView::from).collect(),
        }
        .into_response(),
        Err(e) => {
            AppError::from(e).report("Error loading dashboard");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading dashboard").into_response()
        }
    }
}

/// Delete a feedback record.
///
/// POST /delete/{id}
///
/// Deleting an id that does not exist is still a success.
#[instrument(skip_all, fields(feedback_id = %raw_id))]
pub async fn delete(
    _admin: RequireAdminAction,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiOutcome {
    let Ok(id) = raw_id.parse::<FeedbackId>() else {
        return ApiOutcome::bad_request("Invalid feedback id");
    };

    match state.feedback().delete(id).await {
        Ok(removed) => {
            tracing::info!(feedback_id = %id, removed, "Feedback deleted");
            ApiOutcome::Success(())
        }
        Err(e) => ApiOutcome::server_error(&AppError::from(e), "Error deleting feedback"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, header},
        routing::{get, post},
    };
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use super::*;
    use crate::db::{FeedbackRepository, MemoryFeedbackRepository};
    use crate::models::NewFeedback;
    use crate::test_support::test_config;
    use feedback_desk_core::Rating;

    fn app(store: Arc<MemoryFeedbackRepository>) -> Router {
        Router::new()
            .route("/dashboard", get(dashboard))
            .route("/delete/{id}", post(delete))
            .layer(SessionManagerLayer::new(MemoryStore::default()))
            .with_state(AppState::new(test_config(), store))
    }

    async fn seed(store: &MemoryFeedbackRepository) -> FeedbackId {
        store
            .create(NewFeedback {
                name: "Al".to_string(),
                email: "a@x.com".to_string(),
                rating: Rating::new(4),
                comments: "solid".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[test]
    fn test_view_formats_timestamp() {
        let feedback = Feedback {
            id: FeedbackId::new(7),
            name: "Al".to_string(),
            email: "a@x.com".to_string(),
            rating: Rating::new(2),
            comments: "meh".to_string(),
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
        };
        let view = FeedbackView::from(&feedback);
        assert_eq!(view.id, "7");
        assert_eq!(view.rating, 2);
        assert_eq!(view.submitted_at, "1970-01-01 00:00 UTC");
    }

    #[tokio::test]
    async fn test_dashboard_without_session_redirects_to_login() {
        let response = app(Arc::new(MemoryFeedbackRepository::new()))
            .oneshot(Request::get("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/admin");
    }

    #[tokio::test]
    async fn test_dashboard_redirects_json_callers_too() {
        let response = app(Arc::new(MemoryFeedbackRepository::new()))
            .oneshot(
                Request::get("/dashboard")
                    .header(header::ACCEPT, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin");
    }

    #[tokio::test]
    async fn test_delete_without_session_changes_nothing() {
        let store = Arc::new(MemoryFeedbackRepository::new());
        let id = seed(&store).await;

        let response = app(store.clone())
            .oneshot(
                Request::post(format!("/delete/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_redirection());

        let response = app(store.clone())
            .oneshot(
                Request::post(format!("/delete/{id}"))
                    .header(header::ACCEPT, "application/json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], serde_json::Value::Bool(false));

        assert_eq!(store.list_newest_first().await.unwrap().len(), 1);
    }
}
