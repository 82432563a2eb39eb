//! Access guard for admin-only routes.
//!
//! The guard is a pure predicate over the session: a request is allowed iff
//! the session carries `admin = true`. A missing session, a missing flag, or
//! a flag that cannot be read all count as "not an admin"; the guard itself
//! never fails.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::ACCEPT, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;
use crate::routes::outcome::ApiOutcome;

/// Where denied requests are sent.
pub const LOGIN_PATH: &str = "/admin";

/// Decision returned by the access guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Control passes to the requested operation.
    Allow,
    /// The requested operation never executes.
    Deny,
}

impl AccessDecision {
    /// Decide from the stored admin flag.
    #[must_use]
    pub const fn from_admin_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Allow,
            Some(false) | None => Self::Deny,
        }
    }

    /// Read the admin flag from a session (if any) and decide.
    pub async fn for_session(session: Option<&Session>) -> Self {
        let flag = match session {
            Some(session) => session
                .get::<bool>(session_keys::ADMIN)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Self::from_admin_flag(flag)
    }

    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Extractor that requires an admin session on a page route.
///
/// Denied requests are always redirected to the login form, whatever the
/// `Accept` header says.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "only admins see this"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

/// Extractor that requires an admin session on an action called by script.
///
/// Page requests are redirected like [`RequireAdmin`]. Callers that ask for
/// JSON (`Accept: application/json`) get a `401` JSON failure instead, so
/// the dashboard script can react to an expired login.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdminAction;

/// Error returned when admin access is required but the session lacks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// Redirect to the login page (for HTML requests).
    RedirectToLogin,
    /// JSON `401` response (for AJAX requests).
    Unauthorized,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => ApiOutcome::<()>::unauthorized().into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if AccessDecision::for_session(parts.extensions.get::<Session>())
            .await
            .is_allowed()
        {
            Ok(Self)
        } else {
            Err(AdminAuthRejection::RedirectToLogin)
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAction
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if AccessDecision::for_session(parts.extensions.get::<Session>())
            .await
            .is_allowed()
        {
            return Ok(Self);
        }

        if prefers_json(&parts.headers) {
            Err(AdminAuthRejection::Unauthorized)
        } else {
            Err(AdminAuthRejection::RedirectToLogin)
        }
    }
}

/// Whether the caller explicitly asked for a JSON response.
fn prefers_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// Mark the session as belonging to the admin.
///
/// This is the only session mutation a successful login performs.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn grant_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN, true).await
}

/// Destroy the whole session, not just the admin flag.
///
/// # Errors
///
/// Returns an error if the session store cannot delete the record.
pub async fn destroy_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
