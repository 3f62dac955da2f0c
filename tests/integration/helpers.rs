//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use authgate_api::{AppState, build_router, build_state};
use authgate_core::config::{AppConfig, UserDirectoryProvider};
use authgate_core::traits::ManualClock;
use authgate_database::{MemoryUserDirectory, UserDirectory};
use authgate_entity::user::UserId;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching the session store directly
    pub state: AppState,
    /// Clock the session store reads
    pub clock: Arc<ManualClock>,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a new test application backed by an in-memory directory
    pub fn new() -> Self {
        Self::with_directory(Arc::new(MemoryUserDirectory::new()))
    }

    /// Create a test application over the given user directory
    pub fn with_directory(directory: Arc<dyn UserDirectory>) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = UserDirectoryProvider::Memory;
        config.session.cleanup_interval_seconds = 0;
        let config = Arc::new(config);

        let clock = Arc::new(ManualClock::starting_now());
        let state = build_state(Arc::clone(&config), directory, clock.clone());
        let router = build_router(state.clone());

        Self {
            router,
            state,
            clock,
            config,
        }
    }

    /// Create a test user and return their ID
    pub async fn create_test_user(&self, username: &str, password: &str) -> UserId {
        self.state
            .session_manager
            .accounts()
            .register(username, password)
            .await
            .expect("Failed to create test user")
            .id
    }

    /// Login and return the session token from the `Set-Cookie` header
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .session_cookie(&self.config.session.cookie_name)
            .expect("No session cookie in login response")
    }

    /// Make an HTTP request to the test app, optionally carrying a session cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = session {
            req = req.header(
                header::COOKIE,
                format!("{}={}", self.config.session.cookie_name, token),
            );
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prebuilt request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Every `Set-Cookie` header for `name`, as raw strings
    pub fn set_cookies(&self, name: &str) -> Vec<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|v| v.starts_with(&prefix))
            .map(str::to_string)
            .collect()
    }

    /// Value of the `name` cookie set by this response
    pub fn session_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies(name).first().and_then(|raw| {
            raw.split(';')
                .next()
                .and_then(|pair| pair.strip_prefix(&prefix))
                .map(str::to_string)
        })
    }

    /// The `message` field of an error body
    pub fn error_message(&self) -> &str {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}
