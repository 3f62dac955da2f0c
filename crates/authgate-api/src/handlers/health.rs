//! Health check handler.

use axum::Json;
use axum::extract::State;

use authgate_database::UserDirectory;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let directory = match state
        .session_manager
        .accounts()
        .directory()
        .health_check()
        .await
    {
        Ok(true) => "ok",
        Ok(false) => "unavailable",
        Err(e) => {
            tracing::warn!(error = %e, "User directory health check failed");
            "unavailable"
        }
    };

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        directory: directory.to_string(),
        active_sessions: state.session_manager.active_sessions(),
    }))
}
