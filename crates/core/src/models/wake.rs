use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AlarmError, AlarmResult};
use crate::models::time::TimeOfDay;

pub const MIN_STEP_VOLUME: u8 = 10;
pub const MAX_STEP_VOLUME: u8 = 100;
pub const STEP_VOLUME_INCREMENT: u8 = 5;
pub const DEFAULT_STEP_SONG: &str = "Default Alarm";
pub const DEFAULT_STEP_VOLUME: u8 = 50;

/// One stage of a multi-stage custom wake sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationStep {
    pub id: Uuid,
    pub song: String,
    pub volume: u8,
    pub time: TimeOfDay,
}

impl EscalationStep {
    fn validate_volume(volume: u8) -> AlarmResult<()> {
        if !(MIN_STEP_VOLUME..=MAX_STEP_VOLUME).contains(&volume) {
            return Err(AlarmError::Validation(format!(
                "Step volume must be between {} and {}, got {}",
                MIN_STEP_VOLUME, MAX_STEP_VOLUME, volume
            )));
        }
        // Volume sliders move in fixed increments
        if volume % STEP_VOLUME_INCREMENT != 0 {
            return Err(AlarmError::Validation(format!(
                "Step volume must be a multiple of {}, got {}",
                STEP_VOLUME_INCREMENT, volume
            )));
        }
        Ok(())
    }
}

/// A single-field edit to an escalation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum StepChange {
    Song(String),
    Volume(u8),
    Time(TimeOfDay),
}

/// Ordered list of escalation steps. Always holds at least one step;
/// removing the last remaining step is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepList {
    steps: Vec<EscalationStep>,
}

impl StepList {
    /// A fresh list seeded with the default 07:00 step.
    pub fn new() -> Self {
        Self {
            steps: vec![EscalationStep {
                id: Uuid::new_v4(),
                song: DEFAULT_STEP_SONG.to_string(),
                volume: DEFAULT_STEP_VOLUME,
                time: TimeOfDay { hour: 7, minutes: 0 },
            }],
        }
    }

    pub fn from_steps(steps: Vec<EscalationStep>) -> AlarmResult<Self> {
        if steps.is_empty() {
            return Err(AlarmError::Validation(
                "A custom wake sequence must contain at least one step".to_string(),
            ));
        }
        for step in &steps {
            EscalationStep::validate_volume(step.volume)?;
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[EscalationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        // Only reachable through deserialization of invalid input; normal
        // construction keeps at least one step.
        self.steps.is_empty()
    }

    /// Appends a new step cloned from the last step's song, volume and time,
    /// under a fresh id. Returns the new id.
    pub fn add_step(&mut self) -> Uuid {
        // The list is never empty through normal construction; a list that
        // arrived empty via deserialization gets the default step instead.
        let step = match self.steps.last() {
            Some(last) => EscalationStep {
                id: Uuid::new_v4(),
                song: last.song.clone(),
                volume: last.volume,
                time: last.time,
            },
            None => EscalationStep {
                id: Uuid::new_v4(),
                song: DEFAULT_STEP_SONG.to_string(),
                volume: DEFAULT_STEP_VOLUME,
                time: TimeOfDay { hour: 7, minutes: 0 },
            },
        };
        let id = step.id;
        self.steps.push(step);
        id
    }

    /// Removes the step with the given id, unless it is the only step left.
    /// Returns whether a step was removed.
    pub fn remove_step(&mut self, id: Uuid) -> bool {
        if self.steps.len() <= 1 {
            return false;
        }
        let before = self.steps.len();
        self.steps.retain(|step| step.id != id);
        self.steps.len() < before
    }

    /// Applies a single-field change to the matching step, leaving the rest
    /// untouched. Returns whether a step was updated; unknown ids are a
    /// no-op.
    pub fn update_step(&mut self, id: Uuid, change: StepChange) -> AlarmResult<bool> {
        let Some(step) = self.steps.iter_mut().find(|step| step.id == id) else {
            return Ok(false);
        };
        match change {
            StepChange::Song(song) => step.song = song,
            StepChange::Volume(volume) => {
                EscalationStep::validate_volume(volume)?;
                step.volume = volume;
            }
            StepChange::Time(time) => step.time = time,
        }
        Ok(true)
    }
}

impl Default for StepList {
    fn default() -> Self {
        Self::new()
    }
}

/// How a firing alarm escalates until dismissed. Tagged so each mode carries
/// its own schema instead of sharing free-form columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WakeSequence {
    /// Repeats the alarm sound a fixed number of times at a fixed interval.
    Simple {
        repeat_times: u32,
        interval_minutes: u32,
    },
    /// Like Simple, but each repeat plays louder by the given percentage.
    VolumeEscalation {
        repeat_times: u32,
        interval_minutes: u32,
        volume_increment: u32,
    },
    /// Fully custom ordered step sequence.
    CustomSteps { steps: StepList },
}

impl Default for WakeSequence {
    fn default() -> Self {
        WakeSequence::Simple {
            repeat_times: 3,
            interval_minutes: 5,
        }
    }
}

impl WakeSequence {
    pub fn validate(&self) -> AlarmResult<()> {
        match self {
            WakeSequence::Simple {
                repeat_times,
                interval_minutes,
            }
            | WakeSequence::VolumeEscalation {
                repeat_times,
                interval_minutes,
                ..
            } => {
                if *repeat_times == 0 {
                    return Err(AlarmError::Validation(
                        "Repeat count must be at least 1".to_string(),
                    ));
                }
                if *interval_minutes == 0 {
                    return Err(AlarmError::Validation(
                        "Repeat interval must be at least 1 minute".to_string(),
                    ));
                }
                Ok(())
            }
            WakeSequence::CustomSteps { steps } => {
                // StepList construction already enforces the non-empty
                // invariant; re-check after deserialization from storage.
                if steps.steps().is_empty() {
                    return Err(AlarmError::Validation(
                        "A custom wake sequence must contain at least one step".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}
