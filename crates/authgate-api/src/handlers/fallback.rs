//! Fallback for unmatched routes.

use authgate_core::error::AppError;

use crate::error::ApiError;

/// Any method or path without a route.
pub async fn not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}
