//! Auth handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::AppResult;
use crate::services::AuthService;
use crate::state::AppState;

use super::request::{LoginRequest, RegisterRequest};
use super::response::{AuthResponse, UserResponse};

/// POST /api/v1/auth/register - Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<UserResponse>> {
    payload.validate()?;

    let user = AuthService::register(state.db(), &payload.username, &payload.password).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "user registered");

    Ok(Json(user.into()))
}

/// POST /api/v1/auth/login - Login and receive a JWT
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let (user, token, expires_in) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.username,
        &payload.password,
    )
    .await?;

    Ok(Json(AuthResponse {
        token,
        expires_in,
        user: user.into(),
    }))
}
