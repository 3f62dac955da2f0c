//! Profile handler.

use axum::Json;
use axum::extract::State;

use authgate_entity::user::UserProfile;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::SessionCookie;
use crate::state::AppState;

/// GET /profile
pub async fn get_profile(
    State(state): State<AppState>,
    session: SessionCookie,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let user = state.session_manager.profile(session.token()).await?;
    Ok(Json(ApiResponse::ok(user.profile())))
}
