//! Authentication route handlers.
//!
//! Login compares against the configured admin credentials and, on success,
//! flips the session's `admin` flag. Logout destroys the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::body::{BodyRejection, JsonOrForm};
use crate::error::AppError;
use crate::filters;
use crate::middleware::{destroy_session, grant_admin};
use crate::services::{AdminAuthService, LoginOutcome};
use crate::state::AppState;

/// Where a successful login lands.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Message shown for every rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login form data, posted as a form or as JSON.
///
/// No `Debug` derive: the password must never be logged.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin_login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Render the login page.
///
/// GET /admin
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate { error: None }
}

/// Handle login form submission.
///
/// POST /admin
///
/// A malformed body is answered exactly like a wrong password.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    body: Result<JsonOrForm<LoginForm>, BodyRejection>,
) -> Response {
    let outcome = match &body {
        Ok(JsonOrForm(form)) => {
            AdminAuthService::new(&state.config().admin).verify(&form.username, &form.password)
        }
        Err(rejection) => {
            tracing::debug!(error = rejection.detail(), "Malformed login body");
            LoginOutcome::Rejected
        }
    };

    match outcome {
        LoginOutcome::Accepted => match grant_admin(&session).await {
            Ok(()) => {
                tracing::info!("Admin logged in");
                Redirect::to(DASHBOARD_PATH).into_response()
            }
            Err(e) => AppError::from(e).into_response(),
        },
        LoginOutcome::Rejected => {
            tracing::warn!("Admin login rejected");
            LoginTemplate {
                error: Some(INVALID_CREDENTIALS),
            }
            .into_response()
        }
    }
}

/// Logout and destroy the session.
///
/// GET /logout
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Response {
    match destroy_session(&session).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            AppError::from(e).report("Error logging out");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error logging out").into_response()
        }
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
        routing::get,
    };
    use async_trait::async_trait;
    use tower::ServiceExt;
    use tower_sessions::{
        MemoryStore, SessionManagerLayer, SessionStore,
        session::{Id, Record},
        session_store,
    };

    use super::*;
    use crate::db::MemoryFeedbackRepository;
    use crate::test_support::{ADMIN_PASSWORD, ADMIN_USERNAME, test_config};

    /// Session store that keeps sessions but cannot destroy them.
    #[derive(Debug, Clone, Default)]
    struct UndeletableStore(MemoryStore);

    #[async_trait]
    impl SessionStore for UndeletableStore {
        async fn create(&self, record: &mut Record) -> session_store::Result<()> {
            self.0.create(record).await
        }

        async fn save(&self, record: &Record) -> session_store::Result<()> {
            self.0.save(record).await
        }

        async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
            self.0.load(session_id).await
        }

        async fn delete(&self, _session_id: &Id) -> session_store::Result<()> {
            Err(session_store::Error::Backend("delete refused".to_string()))
        }
    }

    fn app_with_store<S: SessionStore + Clone>(store: S) -> Router {
        Router::new()
            .route("/admin", get(login_page).post(login))
            .route("/logout", get(logout))
            .layer(SessionManagerLayer::new(store))
            .with_state(AppState::new(
                test_config(),
                Arc::new(MemoryFeedbackRepository::new()),
            ))
    }

    fn app() -> Router {
        app_with_store(MemoryStore::default())
    }

    /// The `name=value` pair of a `Set-Cookie` header.
    fn session_cookie(response: &Response) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn post_login(body: String) -> Response {
        app()
            .oneshot(
                Request::post("/admin")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_login_page_renders_form() {
        let response = app()
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("name=\"password\""));
    }

    #[tokio::test]
    async fn test_correct_credentials_redirect_and_set_session() {
        let response =
            post_login(format!("username={ADMIN_USERNAME}&password={ADMIN_PASSWORD}")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], DASHBOARD_PATH);
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_json_login_is_accepted() {
        let response = app()
            .oneshot(
                Request::post("/admin")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(
                        r#"{{"username":"{ADMIN_USERNAME}","password":"{ADMIN_PASSWORD}"}}"#
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], DASHBOARD_PATH);
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_json_login_with_wrong_password_is_rejected() {
        let response = app()
            .oneshot(
                Request::post("/admin")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(
                        r#"{{"username":"{ADMIN_USERNAME}","password":"nope"}}"#
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
        assert!(body_text(response).await.contains(INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_wrong_password_shows_retry_without_session() {
        let response = post_login(format!("username={ADMIN_USERNAME}&password=nope")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
        let body = body_text(response).await;
        assert!(body.contains(INVALID_CREDENTIALS));
        assert!(body.contains("Try again"));
    }

    #[tokio::test]
    async fn test_wrong_username_gets_same_response() {
        let wrong_user =
            body_text(post_login(format!("username=root&password={ADMIN_PASSWORD}")).await).await;
        let wrong_pass =
            body_text(post_login(format!("username={ADMIN_USERNAME}&password=nope")).await).await;
        assert_eq!(wrong_user, wrong_pass);
    }

    #[tokio::test]
    async fn test_malformed_form_is_rejected_like_bad_credentials() {
        let response = post_login("username=admin".to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn test_logout_redirects_home() {
        let response = app()
            .oneshot(Request::get("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_logout_failure_is_plain_text_500() {
        let app = app_with_store(UndeletableStore::default());

        let login = app
            .clone()
            .oneshot(
                Request::post("/admin")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!(
                        "username={ADMIN_USERNAME}&password={ADMIN_PASSWORD}"
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&login);

        let response = app
            .oneshot(
                Request::get("/logout")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Error logging out");
    }
}
