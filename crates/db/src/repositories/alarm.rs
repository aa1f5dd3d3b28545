use crate::models::DbAlarm;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use wakesync_core::models::alarm::NewAlarm;

pub async fn create_alarm(pool: &Pool<Postgres>, new_alarm: &NewAlarm) -> Result<DbAlarm> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating alarm: id={}, user_id={}, name={}",
        id,
        new_alarm.user_id,
        new_alarm.name
    );

    let alarm = sqlx::query_as::<_, DbAlarm>(
        r#"
        INSERT INTO alarms (id, user_id, name, hour, minutes, days_active, is_active,
            stop_method, snooze_duration_minutes, snooze_max_count, wake_sequence,
            created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING id, user_id, name, hour, minutes, days_active, is_active,
            stop_method, snooze_duration_minutes, snooze_max_count, wake_sequence,
            created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(new_alarm.user_id)
    .bind(&new_alarm.name)
    .bind(new_alarm.time.hour as i16)
    .bind(new_alarm.time.minutes as i16)
    .bind(new_alarm.days_active.to_storage())
    .bind(new_alarm.is_active)
    .bind(new_alarm.stop_method.as_str())
    .bind(new_alarm.snooze_duration_minutes)
    .bind(new_alarm.snooze_max_count)
    .bind(serde_json::to_value(&new_alarm.wake_sequence)?)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Alarm created successfully: id={}", id);
    Ok(alarm)
}

pub async fn get_alarm_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<DbAlarm>> {
    tracing::debug!("Getting alarm by id: id={}, user_id={}", id, user_id);

    let alarm = sqlx::query_as::<_, DbAlarm>(
        r#"
        SELECT id, user_id, name, hour, minutes, days_active, is_active,
            stop_method, snooze_duration_minutes, snooze_max_count, wake_sequence,
            created_at, updated_at
        FROM alarms
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    if alarm.is_none() {
        tracing::debug!("Alarm not found: id={}, user_id={}", id, user_id);
    }

    Ok(alarm)
}

pub async fn list_alarms_by_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Vec<DbAlarm>> {
    let alarms = sqlx::query_as::<_, DbAlarm>(
        r#"
        SELECT id, user_id, name, hour, minutes, days_active, is_active,
            stop_method, snooze_duration_minutes, snooze_max_count, wake_sequence,
            created_at, updated_at
        FROM alarms
        WHERE user_id = $1
        ORDER BY hour ASC, minutes ASC, created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Listed {} alarms for user_id={}", alarms.len(), user_id);
    Ok(alarms)
}

pub async fn update_alarm(
    pool: &Pool<Postgres>,
    id: Uuid,
    new_alarm: &NewAlarm,
) -> Result<Option<DbAlarm>> {
    tracing::debug!("Updating alarm: id={}, user_id={}", id, new_alarm.user_id);

    let alarm = sqlx::query_as::<_, DbAlarm>(
        r#"
        UPDATE alarms
        SET name = $3, hour = $4, minutes = $5, days_active = $6, is_active = $7,
            stop_method = $8, snooze_duration_minutes = $9, snooze_max_count = $10,
            wake_sequence = $11, updated_at = $12
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, hour, minutes, days_active, is_active,
            stop_method, snooze_duration_minutes, snooze_max_count, wake_sequence,
            created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(new_alarm.user_id)
    .bind(&new_alarm.name)
    .bind(new_alarm.time.hour as i16)
    .bind(new_alarm.time.minutes as i16)
    .bind(new_alarm.days_active.to_storage())
    .bind(new_alarm.is_active)
    .bind(new_alarm.stop_method.as_str())
    .bind(new_alarm.snooze_duration_minutes)
    .bind(new_alarm.snooze_max_count)
    .bind(serde_json::to_value(&new_alarm.wake_sequence)?)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(alarm)
}

/// Flips only `is_active` and `updated_at`; every other column is left as
/// stored.
pub async fn set_alarm_active(
    pool: &Pool<Postgres>,
    id: Uuid,
    user_id: Uuid,
    is_active: bool,
) -> Result<Option<DbAlarm>> {
    tracing::debug!(
        "Setting alarm active: id={}, user_id={}, is_active={}",
        id,
        user_id,
        is_active
    );

    let alarm = sqlx::query_as::<_, DbAlarm>(
        r#"
        UPDATE alarms
        SET is_active = $3, updated_at = $4
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, hour, minutes, days_active, is_active,
            stop_method, snooze_duration_minutes, snooze_max_count, wake_sequence,
            created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(is_active)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(alarm)
}

pub async fn delete_alarm(pool: &Pool<Postgres>, id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM alarms
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    let deleted = result.rows_affected() > 0;
    tracing::debug!(
        "Delete alarm: id={}, user_id={}, deleted={}",
        id,
        user_id,
        deleted
    );
    Ok(deleted)
}
