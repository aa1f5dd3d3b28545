use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{AlarmError, AlarmResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOption {
    pub value: u8,
    pub label: &'static str,
    pub short_label: &'static str,
}

/// Fixed week table, Sunday-first. Day codes are 0 (Sunday) through
/// 6 (Saturday) everywhere, including storage.
pub const DAY_OPTIONS: [DayOption; 7] = [
    DayOption { value: 0, label: "Sunday", short_label: "Sun" },
    DayOption { value: 1, label: "Monday", short_label: "Mon" },
    DayOption { value: 2, label: "Tuesday", short_label: "Tue" },
    DayOption { value: 3, label: "Wednesday", short_label: "Wed" },
    DayOption { value: 4, label: "Thursday", short_label: "Thu" },
    DayOption { value: 5, label: "Friday", short_label: "Fri" },
    DayOption { value: 6, label: "Saturday", short_label: "Sat" },
];

const WORKDAYS: [u8; 5] = [1, 2, 3, 4, 5];
const WEEKENDS: [u8; 2] = [0, 6];

/// The set of weekdays an alarm repeats on, kept in canonical Sunday-first
/// order regardless of selection order. An empty set means the alarm fires
/// once and does not repeat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct DaySet(BTreeSet<u8>);

// Deserialized through `from_codes` so out-of-range codes are rejected at
// the boundary instead of panicking later in `classify`
impl<'de> Deserialize<'de> for DaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let codes = Vec::<u8>::deserialize(deserializer)?;
        DaySet::from_codes(codes).map_err(serde::de::Error::custom)
    }
}

impl DaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes<I: IntoIterator<Item = u8>>(codes: I) -> AlarmResult<Self> {
        let mut days = BTreeSet::new();
        for code in codes {
            if code > 6 {
                return Err(AlarmError::Validation(format!(
                    "Day code must be between 0 and 6, got {}",
                    code
                )));
            }
            days.insert(code);
        }
        Ok(Self(days))
    }

    /// Rebuilds a set from its stored representation, where NULL stands for
    /// the empty "fire once" selection.
    pub fn from_storage(stored: Option<Vec<i32>>) -> AlarmResult<Self> {
        match stored {
            None => Ok(Self::new()),
            Some(codes) => {
                let codes: Vec<u8> = codes
                    .into_iter()
                    .map(|c| {
                        u8::try_from(c).map_err(|_| {
                            AlarmError::Validation(format!(
                                "Day code must be between 0 and 6, got {}",
                                c
                            ))
                        })
                    })
                    .collect::<AlarmResult<_>>()?;
                Self::from_codes(codes)
            }
        }
    }

    /// Storage form: NULL when empty, otherwise the day codes in canonical
    /// order.
    pub fn to_storage(&self) -> Option<Vec<i32>> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.iter().map(|&c| c as i32).collect())
        }
    }

    pub fn toggle(&mut self, code: u8) -> AlarmResult<()> {
        if code > 6 {
            return Err(AlarmError::Validation(format!(
                "Day code must be between 0 and 6, got {}",
                code
            )));
        }
        if !self.0.remove(&code) {
            self.0.insert(code);
        }
        Ok(())
    }

    pub fn contains(&self, code: u8) -> bool {
        self.0.contains(&code)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn codes(&self) -> Vec<u8> {
        self.0.iter().copied().collect()
    }

    /// Human label for the selection: "Once", "Every day", "Workdays",
    /// "Weekends", or comma-joined short labels in Sunday-first order.
    pub fn classify(&self) -> String {
        if self.0.is_empty() {
            return "Once".to_string();
        }
        if self.0.len() == 7 {
            return "Every day".to_string();
        }
        if self.matches(&WORKDAYS) {
            return "Workdays".to_string();
        }
        if self.matches(&WEEKENDS) {
            return "Weekends".to_string();
        }
        self.0
            .iter()
            .map(|&code| DAY_OPTIONS[code as usize].short_label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn matches(&self, exact: &[u8]) -> bool {
        self.0.len() == exact.len() && exact.iter().all(|code| self.0.contains(code))
    }
}
