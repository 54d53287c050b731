/*
 * Responsibility
 * - FromRequestParts impls reading the AuthCtx the session filter attached
 * - AuthCtx: always succeeds (anonymous fallback)
 * - CurrentUser: the authorization gate; rejects anonymous requests with 401
 */
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

impl FromRequestParts<AppState> for AuthCtx
where
    AppState: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .unwrap_or_else(AuthCtx::anonymous))
    }
}

/// Extractor for routes that require an authenticated caller.
///
/// The session filter never rejects; handlers opt into protection by taking
/// this extractor instead of `AuthCtx`.
pub struct CurrentUser(pub AuthCtx);

impl FromRequestParts<AppState> for CurrentUser
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .filter(|ctx| ctx.is_authenticated())
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
