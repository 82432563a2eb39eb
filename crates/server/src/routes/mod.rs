//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (record store reachable)
//!
//! # Public
//! GET  /                       - Feedback form
//! POST /feedback               - Submit feedback (JSON or form body)
//!
//! # Auth
//! GET  /admin                  - Login page
//! POST /admin                  - Login action
//! GET  /logout                 - Destroy session
//!
//! # Dashboard (admin only)
//! GET  /dashboard              - Feedback listing, newest first
//! POST /delete/{id}            - Delete a feedback record
//! ```

pub mod auth;
pub mod body;
pub mod dashboard;
pub mod feedback;
pub mod health;
pub mod home;
pub mod outcome;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the application router (without middleware layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(home::index))
        .route("/feedback", post(feedback::submit))
        .route("/admin", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/delete/{id}", post(dashboard::delete))
}
