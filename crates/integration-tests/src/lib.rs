//! Integration test harness for Feedback Desk.
//!
//! Each [`TestServer`] serves the real application router on an ephemeral
//! port, backed by in-memory feedback and session stores, so the scenario
//! tests in `tests/` run without a database.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p feedback-desk-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, Response, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tokio::task::JoinHandle;
use tower_sessions::MemoryStore;

use feedback_desk_core::FeedbackId;
use feedback_desk_server::{
    build_app,
    config::{AdminCredentials, FeedbackConfig},
    db::MemoryFeedbackRepository,
    middleware::create_session_layer,
    state::AppState,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Configuration for a throwaway server.
#[must_use]
pub fn test_config() -> FeedbackConfig {
    FeedbackConfig {
        database_url: SecretString::from("postgres://unused"),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        session_secret: SecretString::from("Zr8#kQ2v!Lm5@Wx9$Tb4&Np7^Hd3*Fs6"),
        admin: AdminCredentials {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
        },
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../server/static").to_string(),
        log_json: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A running application instance.
pub struct TestServer {
    addr: SocketAddr,
    /// Direct handle on the record store, for assertions and fault injection.
    pub feedback: Arc<MemoryFeedbackRepository>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Bind to `127.0.0.1:0` and start serving in the background.
    pub async fn spawn() -> Self {
        let config = test_config();
        let feedback = Arc::new(MemoryFeedbackRepository::new());
        let session_layer = create_session_layer(MemoryStore::default(), &config);
        let app = build_app(AppState::new(config, feedback.clone()), session_layer);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            addr,
            feedback,
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A client that keeps cookies and does not follow redirects.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Submit feedback as JSON and return the parsed response body.
    pub async fn submit(&self, client: &Client, name: &str, rating: i32) -> Value {
        let resp = client
            .post(self.url("/feedback"))
            .json(&serde_json::json!({
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "rating": rating,
                "comments": format!("comments from {name}"),
            }))
            .send()
            .await
            .expect("Failed to submit feedback");
        assert_eq!(resp.status(), StatusCode::OK);
        resp.json().await.expect("Feedback response was not JSON")
    }

    /// Post the login form.
    pub async fn login_with(&self, client: &Client, username: &str, password: &str) -> Response {
        client
            .post(self.url("/admin"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to post login form")
    }

    /// Log in with the configured admin credentials.
    pub async fn login(&self, client: &Client) {
        let resp = self.login_with(client, ADMIN_USERNAME, ADMIN_PASSWORD).await;
        assert_redirect(&resp, "/dashboard");
    }

    /// Log out, expecting the redirect home.
    pub async fn logout(&self, client: &Client) {
        let resp = client
            .get(self.url("/logout"))
            .send()
            .await
            .expect("Failed to log out");
        assert_redirect(&resp, "/");
    }

    /// Fetch the dashboard without following redirects.
    pub async fn dashboard(&self, client: &Client) -> Response {
        client
            .get(self.url("/dashboard"))
            .send()
            .await
            .expect("Failed to fetch dashboard")
    }

    /// Record ids in the order the dashboard lists them.
    pub async fn dashboard_ids(&self, client: &Client) -> Vec<FeedbackId> {
        let resp = self.dashboard(client).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.text().await.expect("Failed to read dashboard");
        listed_ids(&body)
    }

    /// Delete a record through the AJAX endpoint.
    pub async fn delete(&self, client: &Client, id: &str) -> Response {
        client
            .post(self.url(&format!("/delete/{id}")))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .expect("Failed to post delete")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Extract the ids of the delete buttons on a rendered dashboard, in order.
#[must_use]
pub fn listed_ids(html: &str) -> Vec<FeedbackId> {
    const MARKER: &str = "data-id=\"";

    html.match_indices(MARKER)
        .filter_map(|(start, _)| {
            html.get(start + MARKER.len()..)?
                .split('"')
                .next()?
                .parse()
                .ok()
        })
        .collect()
}

/// Assert a `303 See Other` to the given location.
pub fn assert_redirect(resp: &Response, location: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some(location)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_ids_keeps_page_order() {
        let html = r#"<button data-id="3">x</button><button data-id="1">y</button>"#;
        assert_eq!(listed_ids(html), vec![FeedbackId::new(3), FeedbackId::new(1)]);
    }
}
