//! Check-in records and eligibility settings.
//!
//! A `DailyRecordMap` is the strongly-typed shape shared by the local
//! write-ahead copy and the remote store snapshot: date key to at most one
//! payload per period. Payload content itself is opaque JSON owned by the
//! check-in UI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form check-in content (answers plus whatever the UI stores).
pub type Payload = serde_json::Value;

/// One of the two daily check-in windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Evening,
}

/// Per-date record cell pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening: Option<Payload>,
}

impl DayRecord {
    pub fn get(&self, period: Period) -> Option<&Payload> {
        match period {
            Period::Morning => self.morning.as_ref(),
            Period::Evening => self.evening.as_ref(),
        }
    }

    pub fn set(&mut self, period: Period, payload: Payload) {
        match period {
            Period::Morning => self.morning = Some(payload),
            Period::Evening => self.evening = Some(payload),
        }
    }
}

/// Date-keyed (`YYYY-MM-DD`) record map. BTreeMap keeps iteration order
/// deterministic independent of insertion history.
pub type DailyRecordMap = BTreeMap<String, DayRecord>;

/// Which periods prompt the user at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timing {
    Morning,
    Evening,
    Both,
}

/// Settings governing when check-in prompts fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilitySettings {
    #[serde(default = "default_timing")]
    pub timing: Timing,
    #[serde(default = "default_morning_hour")]
    pub morning_hour: u32,
    #[serde(default = "default_evening_hour")]
    pub evening_hour: u32,
}

fn default_timing() -> Timing {
    Timing::Both
}

fn default_morning_hour() -> u32 {
    8
}

fn default_evening_hour() -> u32 {
    18
}

impl Default for EligibilitySettings {
    fn default() -> Self {
        Self {
            timing: default_timing(),
            morning_hour: default_morning_hour(),
            evening_hour: default_evening_hour(),
        }
    }
}
