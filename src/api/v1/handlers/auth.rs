/*
 * Responsibility
 * - POST /auth/signup: validation → account creation → 201
 * - POST /auth/login: validation → credential check → token issuance
 * - Cookie mode: also set the session cookie on login
 */
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::api::v1::dto::auth::{LoginRequest, LoginResponse, SignUpRequest, SignUpResponse};
use crate::config::TokenCarrier;
use crate::error::AppError;
use crate::state::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::InvalidRequest(msg.to_string()))?;

    let user = state
        .accounts
        .sign_up(req.email.trim(), req.nickname.trim(), &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(SignUpResponse::from(user))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    req.validate()
        .map_err(|msg| AppError::InvalidRequest(msg.to_string()))?;

    let user = state.accounts.login(req.email.trim(), &req.password).await?;
    let token = state.tokens.issue(&user.email, user.role, Utc::now())?;

    let body = LoginResponse {
        access_token: token.clone(),
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl_seconds(),
        user_id: user.id,
        email: user.email,
        nickname: user.nickname,
        role: user.role,
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();

    if let TokenCarrier::Cookie { name } = &state.carrier {
        let cookie = format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}",
            name,
            token,
            state.tokens.ttl_seconds()
        );
        let value = cookie.parse().map_err(|_| AppError::Internal)?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}
