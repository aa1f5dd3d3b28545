use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;
use wakesync_core::{
    errors::AlarmError,
    models::session::{
        LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, SessionIdentity,
    },
};

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(AppError(AlarmError::Validation(
            "Please enter both username and password".to_string(),
        )));
    }

    // Reject duplicate usernames before hashing
    let existing = wakesync_db::repositories::user::get_user_by_username(&state.db_pool, username)
        .await
        .map_err(AlarmError::Database)?;
    if existing.is_some() {
        return Err(AppError(AlarmError::Validation(
            "Username already exists".to_string(),
        )));
    }

    let password_hash = auth::hash_password(&payload.password).map_err(AlarmError::Database)?;

    let user = wakesync_db::repositories::user::create_user(&state.db_pool, username, &password_hash)
        .await
        .map_err(AlarmError::Database)?;

    // A new account is logged in immediately
    wakesync_db::repositories::user::touch_last_login(&state.db_pool, user.id)
        .await
        .map_err(AlarmError::Database)?;

    let identity = SessionIdentity::authenticated(user.id, &user.username);
    let token = state.sessions.insert(identity).await;

    tracing::info!("Account created: user_id={}", user.id);

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        last_login: user.last_login,
    }))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = wakesync_db::repositories::user::verify_credentials(
        &state.db_pool,
        &payload.username,
        &payload.password,
    )
    .await
    .map_err(AlarmError::Database)?
    // Unknown user and wrong password produce the same message so neither
    // can be probed from the outside.
    .ok_or_else(|| AlarmError::Authentication("Failed to verify credentials".to_string()))?;

    wakesync_db::repositories::user::touch_last_login(&state.db_pool, user.id)
        .await
        .map_err(AlarmError::Database)?;

    let identity = SessionIdentity::authenticated(user.id, &user.username);
    let token = state.sessions.insert(identity).await;

    tracing::info!("Login successful: user_id={}", user.id);

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
        last_login: user.last_login,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, AppError> {
    let token = auth::bearer_token(&headers)?;
    let logged_out = state.sessions.remove(token).await;

    Ok(Json(LogoutResponse { logged_out }))
}
