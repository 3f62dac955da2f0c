//! Integration tests for session expiry and concurrent access through HTTP.

use authgate_entity::session::SessionToken;
use axum::http::StatusCode;
use chrono::Duration;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_session_expires_after_ttl() {
    let app = TestApp::new();
    app.create_test_user("sleepy", "password123").await;
    let token = app.login("sleepy", "password123").await;

    app.clock.advance(Duration::seconds(3600 + 1));

    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Invalid or expired session");

    // removed on detection
    assert_eq!(app.state.session_manager.active_sessions(), 0);
}

#[tokio::test]
async fn test_expired_session_stays_dead_when_clock_rewinds() {
    let app = TestApp::new();
    app.create_test_user("rewind", "password123").await;
    let token = app.login("rewind", "password123").await;

    app.clock.advance(Duration::hours(2));
    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.clock.advance(Duration::hours(-2));
    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_valid_just_before_ttl() {
    let app = TestApp::new();
    app.create_test_user("punctual", "password123").await;
    let token = app.login("punctual", "password123").await;

    app.clock.advance(Duration::seconds(3599));

    let response = app.request("GET", "/profile", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_session_for_missing_user() {
    let app = TestApp::new();
    let token = app.state.session_manager.store().create(4242);

    let response = app
        .request("GET", "/profile", None, Some(token.as_str()))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_message(), "User not found");
}

#[tokio::test]
async fn test_two_logins_get_independent_sessions() {
    let app = TestApp::new();
    app.create_test_user("double", "password123").await;

    let first = app.login("double", "password123").await;
    let second = app.login("double", "password123").await;
    assert_ne!(first, second);

    app.request("POST", "/logout", None, Some(&first)).await;

    let response = app.request("GET", "/profile", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_profile_requests() {
    let app = std::sync::Arc::new(TestApp::new());
    let user_id = app.create_test_user("crowd", "password123").await;

    let tokens: Vec<SessionToken> = (0..32)
        .map(|_| app.state.session_manager.store().create(user_id))
        .collect();

    let mut handles = Vec::new();
    for token in tokens {
        let app = std::sync::Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            let response = app
                .request("GET", "/profile", None, Some(token.as_str()))
                .await;
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(response.body["data"]["id"], user_id);

            let response = app
                .request("POST", "/logout", None, Some(token.as_str()))
                .await;
            assert_eq!(response.status, StatusCode::OK);

            let response = app
                .request("GET", "/profile", None, Some(token.as_str()))
                .await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(app.state.session_manager.active_sessions(), 0);
}
