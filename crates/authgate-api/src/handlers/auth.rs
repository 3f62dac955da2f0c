//! Auth handlers: login and logout.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use authgate_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::SessionCookie;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid login request: {e}")))?;

    let outcome = state
        .session_manager
        .login(&req.username, &req.password)
        .await?;

    let max_age = state.session_manager.store().ttl().num_seconds();
    let cookie = Cookie::build((state.cookie_name().to_string(), outcome.token.into_inner()))
        .http_only(true)
        .path("/")
        .secure(state.config.session.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age));

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginResponse {
            message: "Login successful".to_string(),
            user_id: outcome.user_id,
            expires_at: outcome.expires_at,
        })),
    ))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    session: SessionCookie,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    state.session_manager.logout(session.token());

    let removal = Cookie::build((state.cookie_name().to_string(), "")).path("/");

    (
        jar.remove(removal),
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    )
}
