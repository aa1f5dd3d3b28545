use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use wakesync_core::{
    errors::AlarmError,
    models::{
        alarm::{
            AlarmResponse, CreateAlarmRequest, DeleteAlarmResponse, ListAlarmsResponse,
            ToggleAlarmResponse, UpdateAlarmRequest,
        },
        time::TimeFormat,
    },
};
use wakesync_db::models::DbAlarm;

use crate::{
    middleware::{auth, error_handling::AppError},
    ApiState,
};

/// Display-format selection for list/get responses; storage is always
/// 24-hour.
#[derive(Debug, Deserialize)]
pub struct DisplayQuery {
    #[serde(default)]
    pub format: TimeFormat,
}

fn to_response(db_alarm: DbAlarm, format: TimeFormat) -> Result<AlarmResponse, AppError> {
    let alarm = db_alarm.into_alarm().map_err(AlarmError::Database)?;
    Ok(AlarmResponse::from_alarm(alarm, format))
}

#[axum::debug_handler]
pub async fn create_alarm(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateAlarmRequest>,
) -> Result<Json<AlarmResponse>, AppError> {
    let identity = auth::authenticate(&state, &headers).await?;

    // Validation happens before any persistence call
    let new_alarm = payload.normalize(&identity)?;

    let db_alarm = wakesync_db::repositories::alarm::create_alarm(&state.db_pool, &new_alarm)
        .await
        .map_err(AlarmError::Database)?;

    Ok(Json(to_response(db_alarm, payload.time_format)?))
}

#[axum::debug_handler]
pub async fn list_alarms(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<DisplayQuery>,
) -> Result<Json<ListAlarmsResponse>, AppError> {
    let identity = auth::authenticate(&state, &headers).await?;
    let user_id = identity
        .user_id()
        .ok_or_else(|| AlarmError::Authorization("User not authenticated".to_string()))?;

    let db_alarms = wakesync_db::repositories::alarm::list_alarms_by_user(&state.db_pool, user_id)
        .await
        .map_err(AlarmError::Database)?;

    let alarms = db_alarms
        .into_iter()
        .map(|db_alarm| to_response(db_alarm, query.format))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListAlarmsResponse { alarms }))
}

#[axum::debug_handler]
pub async fn get_alarm(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Query(query): Query<DisplayQuery>,
) -> Result<Json<AlarmResponse>, AppError> {
    let identity = auth::authenticate(&state, &headers).await?;
    let user_id = identity
        .user_id()
        .ok_or_else(|| AlarmError::Authorization("User not authenticated".to_string()))?;

    let db_alarm = wakesync_db::repositories::alarm::get_alarm_by_id(&state.db_pool, id, user_id)
        .await
        .map_err(AlarmError::Database)?
        .ok_or_else(|| AlarmError::NotFound(format!("Alarm with ID {} not found", id)))?;

    Ok(Json(to_response(db_alarm, query.format)?))
}

#[axum::debug_handler]
pub async fn update_alarm(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAlarmRequest>,
) -> Result<Json<AlarmResponse>, AppError> {
    let identity = auth::authenticate(&state, &headers).await?;

    let new_alarm = payload.normalize(&identity)?;

    let db_alarm = wakesync_db::repositories::alarm::update_alarm(&state.db_pool, id, &new_alarm)
        .await
        .map_err(AlarmError::Database)?
        .ok_or_else(|| AlarmError::NotFound(format!("Alarm with ID {} not found", id)))?;

    Ok(Json(to_response(db_alarm, payload.time_format)?))
}

/// Flips `is_active` and nothing else; days, stop method, and snooze policy
/// stay as stored.
#[axum::debug_handler]
pub async fn toggle_alarm(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleAlarmResponse>, AppError> {
    let identity = auth::authenticate(&state, &headers).await?;
    let user_id = identity
        .user_id()
        .ok_or_else(|| AlarmError::Authorization("User not authenticated".to_string()))?;

    let current = wakesync_db::repositories::alarm::get_alarm_by_id(&state.db_pool, id, user_id)
        .await
        .map_err(AlarmError::Database)?
        .ok_or_else(|| AlarmError::NotFound(format!("Alarm with ID {} not found", id)))?;

    let updated = wakesync_db::repositories::alarm::set_alarm_active(
        &state.db_pool,
        id,
        user_id,
        !current.is_active,
    )
    .await
    .map_err(AlarmError::Database)?
    .ok_or_else(|| AlarmError::NotFound(format!("Alarm with ID {} not found", id)))?;

    Ok(Json(ToggleAlarmResponse {
        id: updated.id,
        is_active: updated.is_active,
        updated_at: updated.updated_at,
    }))
}

#[axum::debug_handler]
pub async fn delete_alarm(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteAlarmResponse>, AppError> {
    let identity = auth::authenticate(&state, &headers).await?;
    let user_id = identity
        .user_id()
        .ok_or_else(|| AlarmError::Authorization("User not authenticated".to_string()))?;

    let deleted = wakesync_db::repositories::alarm::delete_alarm(&state.db_pool, id, user_id)
        .await
        .map_err(AlarmError::Database)?;

    if !deleted {
        return Err(AppError(AlarmError::NotFound(format!(
            "Alarm with ID {} not found",
            id
        ))));
    }

    Ok(Json(DeleteAlarmResponse { id, deleted }))
}
