//! Login, logout and the access guard over real HTTP.

#![allow(clippy::unwrap_used)]

use reqwest::{StatusCode, header};
use serde_json::Value;

use feedback_desk_integration_tests::{ADMIN_USERNAME, TestServer, assert_redirect};
use feedback_desk_server::db::FeedbackRepository;

#[tokio::test]
async fn test_anonymous_dashboard_redirects_to_login() {
    let server = TestServer::spawn().await;
    let resp = server.dashboard(&TestServer::client()).await;
    assert_redirect(&resp, "/admin");
}

#[tokio::test]
async fn test_anonymous_dashboard_redirects_json_callers() {
    let server = TestServer::spawn().await;
    let resp = TestServer::client()
        .get(server.url("/dashboard"))
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .unwrap();
    assert_redirect(&resp, "/admin");
}

#[tokio::test]
async fn test_json_login_grants_dashboard_access() {
    let server = TestServer::spawn().await;
    let client = TestServer::client();

    let resp = client
        .post(server.url("/admin"))
        .json(&serde_json::json!({
            "username": ADMIN_USERNAME,
            "password": feedback_desk_integration_tests::ADMIN_PASSWORD,
        }))
        .send()
        .await
        .unwrap();
    assert_redirect(&resp, "/dashboard");
    assert_eq!(server.dashboard(&client).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_password_leaves_session_without_admin() {
    let server = TestServer::spawn().await;
    let client = TestServer::client();

    let resp = server.login_with(&client, ADMIN_USERNAME, "wrong").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let body = resp.text().await.unwrap();
    assert!(body.contains("Invalid credentials"));
    assert!(body.contains("href=\"/admin\""));

    assert_redirect(&server.dashboard(&client).await, "/admin");
}

#[tokio::test]
async fn test_credentials_are_compared_exactly() {
    let server = TestServer::spawn().await;
    let client = TestServer::client();

    let upper = ADMIN_USERNAME.to_uppercase();
    let padded = format!(" {ADMIN_USERNAME}");
    for username in [upper.as_str(), padded.as_str()] {
        let resp = server
            .login_with(&client, username, feedback_desk_integration_tests::ADMIN_PASSWORD)
            .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    assert_redirect(&server.dashboard(&client).await, "/admin");
}

#[tokio::test]
async fn test_login_then_logout_revokes_access() {
    let server = TestServer::spawn().await;
    let client = TestServer::client();

    server.login(&client).await;
    assert_eq!(server.dashboard(&client).await.status(), StatusCode::OK);

    server.logout(&client).await;
    assert_redirect(&server.dashboard(&client).await, "/admin");
}

#[tokio::test]
async fn test_logout_without_session_still_redirects_home() {
    let server = TestServer::spawn().await;
    server.logout(&TestServer::client()).await;
}

#[tokio::test]
async fn test_sessions_are_per_client() {
    let server = TestServer::spawn().await;
    let admin = TestServer::client();
    let visitor = TestServer::client();

    server.login(&admin).await;
    assert_eq!(server.dashboard(&admin).await.status(), StatusCode::OK);
    assert_redirect(&server.dashboard(&visitor).await, "/admin");
}

#[tokio::test]
async fn test_anonymous_delete_never_runs() {
    let server = TestServer::spawn().await;
    let client = TestServer::client();
    let body = server.submit(&client, "Al", 5).await;
    let id = body["id"].to_string();

    let resp = client
        .post(server.url(&format!("/delete/{id}")))
        .send()
        .await
        .unwrap();
    assert_redirect(&resp, "/admin");

    let resp = server.delete(&client, &id).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], Value::Bool(false));

    assert_eq!(server.feedback.list_newest_first().await.unwrap().len(), 1);
}
