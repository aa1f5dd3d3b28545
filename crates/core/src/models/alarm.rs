use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AlarmError, AlarmResult};
use crate::models::days::DaySet;
use crate::models::session::SessionIdentity;
use crate::models::time::{Meridiem, TimeFormat, TimeOfDay};
use crate::models::wake::WakeSequence;

pub const DEFAULT_SNOOZE_DURATION_MINUTES: i32 = 5;
pub const DEFAULT_SNOOZE_MAX_COUNT: i32 = 3;

/// The dismissal challenge required to silence a firing alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMethod {
    #[default]
    Default,
    MathPuzzle,
    Captcha,
    ShakeDevice,
    TapSequence,
    VoiceCommand,
    SimpleDismiss,
}

impl StopMethod {
    pub const ALL: [StopMethod; 7] = [
        StopMethod::Default,
        StopMethod::MathPuzzle,
        StopMethod::Captcha,
        StopMethod::ShakeDevice,
        StopMethod::TapSequence,
        StopMethod::VoiceCommand,
        StopMethod::SimpleDismiss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StopMethod::Default => "default",
            StopMethod::MathPuzzle => "math_puzzle",
            StopMethod::Captcha => "captcha",
            StopMethod::ShakeDevice => "shake_device",
            StopMethod::TapSequence => "tap_sequence",
            StopMethod::VoiceCommand => "voice_command",
            StopMethod::SimpleDismiss => "simple_dismiss",
        }
    }

    /// Display label: underscores become spaces, words title-cased.
    pub fn label(&self) -> &'static str {
        match self {
            StopMethod::Default => "Default",
            StopMethod::MathPuzzle => "Math Puzzle",
            StopMethod::Captcha => "Captcha",
            StopMethod::ShakeDevice => "Shake Device",
            StopMethod::TapSequence => "Tap Sequence",
            StopMethod::VoiceCommand => "Voice Command",
            StopMethod::SimpleDismiss => "Simple Dismiss",
        }
    }
}

impl fmt::Display for StopMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopMethod {
    type Err = AlarmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(StopMethod::Default),
            "math_puzzle" => Ok(StopMethod::MathPuzzle),
            "captcha" => Ok(StopMethod::Captcha),
            "shake_device" => Ok(StopMethod::ShakeDevice),
            "tap_sequence" => Ok(StopMethod::TapSequence),
            "voice_command" => Ok(StopMethod::VoiceCommand),
            "simple_dismiss" => Ok(StopMethod::SimpleDismiss),
            other => Err(AlarmError::Validation(format!(
                "Unknown stop method: {}",
                other
            ))),
        }
    }
}

/// A persisted alarm configuration. `(id, user_id)` uniquely identifies a
/// record; every read and write is scoped by both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub time: TimeOfDay,
    pub days_active: DaySet,
    pub is_active: bool,
    pub stop_method: StopMethod,
    pub snooze_duration_minutes: i32,
    pub snooze_max_count: Option<i32>,
    pub wake_sequence: WakeSequence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Alarm {
    pub fn snooze_max_count_or_default(&self) -> i32 {
        self.snooze_max_count.unwrap_or(DEFAULT_SNOOZE_MAX_COUNT)
    }
}

/// A normalized alarm payload, ready for insert or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlarm {
    pub user_id: Uuid,
    pub name: String,
    pub time: TimeOfDay,
    pub days_active: DaySet,
    pub is_active: bool,
    pub stop_method: StopMethod,
    pub snooze_duration_minutes: i32,
    pub snooze_max_count: Option<i32>,
    pub wake_sequence: WakeSequence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlarmRequest {
    pub name: String,
    pub hour: u8,
    pub minutes: u8,
    #[serde(default)]
    pub time_format: TimeFormat,
    pub meridiem: Option<Meridiem>,
    #[serde(default)]
    pub days_active: Vec<u8>,
    #[serde(default)]
    pub stop_method: StopMethod,
    pub snooze_duration_minutes: Option<i32>,
    pub snooze_max_count: Option<i32>,
    pub wake_sequence: Option<WakeSequence>,
}

impl CreateAlarmRequest {
    /// Validates the form input and produces the normalized payload.
    ///
    /// Rejects an empty name and a missing authenticated identity before
    /// any persistence call is attempted. Time is normalized to 24-hour
    /// form; an empty day selection stays empty ("fire once").
    pub fn normalize(&self, identity: &SessionIdentity) -> AlarmResult<NewAlarm> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AlarmError::Validation(
                "Please enter an alarm name".to_string(),
            ));
        }
        let user_id = identity
            .user_id()
            .ok_or_else(|| AlarmError::Authorization("User not authenticated".to_string()))?;

        let time = TimeOfDay::from_display(self.hour, self.minutes, self.time_format, self.meridiem)?;
        let days_active = DaySet::from_codes(self.days_active.iter().copied())?;
        let wake_sequence = self.wake_sequence.clone().unwrap_or_default();
        wake_sequence.validate()?;

        Ok(NewAlarm {
            user_id,
            name: name.to_string(),
            time,
            days_active,
            is_active: true,
            stop_method: self.stop_method,
            snooze_duration_minutes: self
                .snooze_duration_minutes
                .unwrap_or(DEFAULT_SNOOZE_DURATION_MINUTES),
            snooze_max_count: self.snooze_max_count,
            wake_sequence,
        })
    }
}

/// Updates carry the full form state, like creates; partial edits are a
/// client concern.
pub type UpdateAlarmRequest = CreateAlarmRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmResponse {
    pub id: Uuid,
    pub name: String,
    pub time: String,
    pub hour: u8,
    pub minutes: u8,
    pub days_active: Vec<u8>,
    pub days_label: String,
    pub is_active: bool,
    pub stop_method: StopMethod,
    pub stop_method_label: String,
    pub snooze_duration_minutes: i32,
    pub snooze_max_count: i32,
    pub wake_sequence: WakeSequence,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlarmResponse {
    pub fn from_alarm(alarm: Alarm, format: TimeFormat) -> Self {
        Self {
            id: alarm.id,
            name: alarm.name.clone(),
            time: alarm.time.format(format),
            hour: alarm.time.hour,
            minutes: alarm.time.minutes,
            days_active: alarm.days_active.codes(),
            days_label: alarm.days_active.classify(),
            is_active: alarm.is_active,
            stop_method: alarm.stop_method,
            stop_method_label: alarm.stop_method.label().to_string(),
            snooze_duration_minutes: alarm.snooze_duration_minutes,
            snooze_max_count: alarm.snooze_max_count_or_default(),
            wake_sequence: alarm.wake_sequence,
            created_at: alarm.created_at,
            updated_at: alarm.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAlarmsResponse {
    pub alarms: Vec<AlarmResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleAlarmResponse {
    pub id: Uuid,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAlarmResponse {
    pub id: Uuid,
    pub deleted: bool,
}
