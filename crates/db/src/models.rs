use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use wakesync_core::models::alarm::{Alarm, StopMethod};
use wakesync_core::models::days::DaySet;
use wakesync_core::models::time::TimeOfDay;
use wakesync_core::models::wake::WakeSequence;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAlarm {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub hour: i16,
    pub minutes: i16,
    pub days_active: Option<Vec<i32>>,
    pub is_active: bool,
    pub stop_method: String,
    pub snooze_duration_minutes: i32,
    pub snooze_max_count: Option<i32>,
    pub wake_sequence: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbAlarm {
    /// Maps a stored row onto the domain model. Rows predating the typed
    /// wake-sequence column fall back to the default simple sequence.
    pub fn into_alarm(self) -> Result<Alarm> {
        let time = TimeOfDay::new(
            u8::try_from(self.hour).map_err(|_| eyre!("Stored hour out of range: {}", self.hour))?,
            u8::try_from(self.minutes)
                .map_err(|_| eyre!("Stored minutes out of range: {}", self.minutes))?,
        )
        .map_err(|e| eyre!("Invalid stored time: {}", e))?;

        let days_active = DaySet::from_storage(self.days_active)
            .map_err(|e| eyre!("Invalid stored day set: {}", e))?;

        let stop_method: StopMethod = self
            .stop_method
            .parse()
            .map_err(|e| eyre!("Invalid stored stop method: {}", e))?;

        let wake_sequence = match self.wake_sequence {
            Some(value) => serde_json::from_value::<WakeSequence>(value)?,
            None => WakeSequence::default(),
        };
        // Transparent step-list deserialization can admit shapes normal
        // construction forbids, such as an empty custom sequence
        wake_sequence
            .validate()
            .map_err(|e| eyre!("Invalid stored wake sequence: {}", e))?;

        Ok(Alarm {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            time,
            days_active,
            is_active: self.is_active,
            stop_method,
            snooze_duration_minutes: self.snooze_duration_minutes,
            snooze_max_count: self.snooze_max_count,
            wake_sequence,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
