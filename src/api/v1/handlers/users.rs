/*
 * Responsibility
 * - GET /users/me: the authenticated caller's own account
 * - CurrentUser has already rejected anonymous requests with 401
 */
use axum::{Json, extract::State};
use tracing::error;

use crate::api::v1::dto::users::UserResponse;
use crate::api::v1::extractors::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

pub async fn me(
    State(state): State<AppState>,
    CurrentUser(ctx): CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .users
        .find_by_email(ctx.subject())
        .await
        .map_err(|err| {
            error!(error = %err, "user directory lookup failed");
            AppError::Internal
        })?
        .ok_or(AppError::NotFound)?;

    Ok(Json(UserResponse::from(user)))
}
