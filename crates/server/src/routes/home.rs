//! Public feedback form.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::AccessDecision;

/// Feedback form page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Read-only view of the session: admins get a dashboard link.
    pub is_admin: bool,
}

/// Render the feedback form.
///
/// GET /
pub async fn index(session: Session) -> impl IntoResponse {
    let is_admin = AccessDecision::for_session(Some(&session))
        .await
        .is_allowed();

    IndexTemplate { is_admin }
}
