use serde::{Deserialize, Serialize};

use crate::errors::{AlarmError, AlarmResult};

/// Display format for alarm times. Alarms are always stored in 24-hour
/// form; the format only affects rendering and form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meridiem {
    Am,
    Pm,
}

/// A wall-clock time of day, stored in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minutes: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minutes: u8) -> AlarmResult<Self> {
        if hour > 23 {
            return Err(AlarmError::Validation(format!(
                "Hour must be between 0 and 23, got {}",
                hour
            )));
        }
        if minutes > 59 {
            return Err(AlarmError::Validation(format!(
                "Minutes must be between 0 and 59, got {}",
                minutes
            )));
        }
        Ok(Self { hour, minutes })
    }

    /// Converts a 12-hour picker selection into stored 24-hour form.
    ///
    /// Pickers in 12-hour mode expose hours 01-12, where 12 marks the start
    /// of the cycle. Displayed hours above 12 are never produced by a valid
    /// picker; when they do arrive they are folded back instead of stored
    /// out of range.
    pub fn from_display_12h(display_hour: u8, minutes: u8, meridiem: Meridiem) -> AlarmResult<Self> {
        let base = match display_hour {
            12 => 0,
            h if h > 12 => h - 12,
            h => h,
        };
        let hour = match meridiem {
            Meridiem::Am => base,
            Meridiem::Pm => base + 12,
        };
        Self::new(hour, minutes)
    }

    /// Normalizes form input in either display format.
    ///
    /// In 12-hour mode a missing meridiem is treated as AM, matching a
    /// picker that only exposes the hour wheel.
    pub fn from_display(
        hour: u8,
        minutes: u8,
        format: TimeFormat,
        meridiem: Option<Meridiem>,
    ) -> AlarmResult<Self> {
        match format {
            TimeFormat::TwentyFourHour => Self::new(hour, minutes),
            TimeFormat::TwelveHour => {
                Self::from_display_12h(hour, minutes, meridiem.unwrap_or(Meridiem::Am))
            }
        }
    }

    /// Renders the time for display: zero-padded `HH:MM` in 24-hour mode,
    /// `hh:MM AM/PM` in 12-hour mode.
    pub fn format(&self, format: TimeFormat) -> String {
        match format {
            TimeFormat::TwentyFourHour => format!("{:02}:{:02}", self.hour, self.minutes),
            TimeFormat::TwelveHour => {
                let meridiem = if self.hour >= 12 { "PM" } else { "AM" };
                let display_hour = match self.hour {
                    0 => 12,
                    h if h > 12 => h - 12,
                    h => h,
                };
                format!("{:02}:{:02} {}", display_hour, self.minutes, meridiem)
            }
        }
    }

    pub fn display_meridiem(&self) -> Meridiem {
        if self.hour >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }
}
