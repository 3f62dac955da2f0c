//! `SessionCookie` extractor: pulls the session token out of the request cookies.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use authgate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Raw session token taken from the configured cookie.
///
/// Only presence is checked here; whether the token names a live session is
/// up to the handler.
#[derive(Debug, Clone)]
pub struct SessionCookie(pub String);

impl SessionCookie {
    /// The token as sent by the client.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<AppState> for SessionCookie {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        jar.get(state.cookie_name())
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .map(SessionCookie)
            .ok_or_else(|| AppError::authentication("No session cookie found").into())
    }
}
