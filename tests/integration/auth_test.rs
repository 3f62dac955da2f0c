//! Integration tests for the login / profile / logout flow.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success_sets_http_only_cookie() {
    let app = TestApp::new();
    let user_id = app.create_test_user("testuser", "password123").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "testuser",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["user_id"], user_id);
    assert!(response.body["data"]["expires_at"].is_string());

    let cookies = response.set_cookies("sessionId");
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
    assert!(cookie.contains("Max-Age=3600"), "{cookie}");
    assert!(!cookie.contains("Secure"), "{cookie}");

    let token = response.session_cookie("sessionId").unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new();
    app.create_test_user("testuser2", "password123").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "testuser2",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookies("sessionId").is_empty());
    assert_eq!(app.state.session_manager.active_sessions(), 0);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_username_is_case_sensitive() {
    let app = TestApp::new();
    app.create_test_user("alice", "password123").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "ALICE",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Invalid username or password");
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "only-a-name" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_empty_credentials() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_returns_user() {
    let app = TestApp::new();
    let user_id = app.create_test_user("meuser", "password123").await;
    let token = app.login("meuser", "password123").await;

    let response = app.request("GET", "/profile", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], user_id);
    assert_eq!(response.body["data"]["username"], "meuser");
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_profile_without_cookie() {
    let app = TestApp::new();

    let response = app.request("GET", "/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "No session cookie found");
}

#[tokio::test]
async fn test_profile_with_unknown_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/profile", None, Some("nonexistent-token-xyz"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Invalid or expired session");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = TestApp::new();
    app.create_test_user("leaver", "password123").await;
    let token = app.login("leaver", "password123").await;

    let response = app.request("POST", "/logout", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["message"], "Logged out");

    let cleared = response.set_cookies("sessionId");
    assert_eq!(cleared.len(), 1);
    assert!(cleared[0].contains("Max-Age=0"), "{}", cleared[0]);

    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Invalid or expired session");
}

#[tokio::test]
async fn test_logout_twice_is_harmless() {
    let app = TestApp::new();
    app.create_test_user("twice", "password123").await;
    let token = app.login("twice", "password123").await;

    let first = app.request("POST", "/logout", None, Some(&token)).await;
    let second = app.request("POST", "/logout", None, Some(&token)).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_cookie() {
    let app = TestApp::new();

    let response = app.request("POST", "/logout", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "No session cookie found");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/nowhere", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.error_message(), "Route not found");
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/login", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_message(), "Route not found");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    app.state.session_manager.store().create(1);

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["directory"], "ok");
    assert_eq!(response.body["data"]["active_sessions"], 1);
}
