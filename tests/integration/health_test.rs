//! Integration tests for the health endpoint against degraded directories.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_database::UserDirectory;
use authgate_entity::user::{NewUser, User, UserId};

use crate::helpers::TestApp;

/// Directory whose backend answers health checks with a fixed outcome
#[derive(Debug)]
struct DegradedDirectory {
    reachable: bool,
}

#[async_trait]
impl UserDirectory for DegradedDirectory {
    async fn find_by_username(&self, _username: &str) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: UserId) -> AppResult<Option<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn create(&self, _user: NewUser) -> AppResult<User> {
        Err(AppError::database("connection refused"))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Err(AppError::database("connection refused"))
    }

    async fn health_check(&self) -> AppResult<bool> {
        if self.reachable {
            Ok(false)
        } else {
            Err(AppError::database("connection refused"))
        }
    }
}

#[tokio::test]
async fn test_health_reports_unhealthy_directory() {
    let app = TestApp::with_directory(Arc::new(DegradedDirectory { reachable: true }));

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["directory"], "unavailable");
}

#[tokio::test]
async fn test_health_reports_failing_directory() {
    let app = TestApp::with_directory(Arc::new(DegradedDirectory { reachable: false }));

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["directory"], "unavailable");
    assert_eq!(response.body["data"]["active_sessions"], 0);
}

#[tokio::test]
async fn test_login_with_failing_directory_is_server_error() {
    let app = TestApp::with_directory(Arc::new(DegradedDirectory { reachable: false }));

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.set_cookies("sessionId").is_empty());
}
