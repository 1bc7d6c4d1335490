//! Core domain types: topics, plan settings, slots, check-in records.
//!
//! Everything here is plain data with serde derives; the engines in
//! `plan`, `merge` and `checkin` operate on these types without any
//! ambient state. Palette and weekday labels are injected structs rather
//! than module-level globals so components stay testable in isolation.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub mod records;
pub mod slots;

pub use records::{DailyRecordMap, DayRecord, EligibilitySettings, Payload, Period, Timing};
pub use slots::{Slot, SlotBoard, SlotGroup, SlotState};

pub type TopicId = String;

/// Fallback color class for topics and suggestion entries without a match.
pub const DEFAULT_COLOR: &str = "bg-gray-500";

pub(crate) fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A unit of study material with a user-supplied priority rank.
///
/// Identity is immutable; `priority_rank` is the position in the user's
/// ordering and is never recomputed by the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    /// Legal area ("Rechtsgebiet") or a custom category.
    #[serde(default)]
    pub category: String,
    pub priority_rank: usize,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Topic {
    pub fn new(id: impl Into<TopicId>, name: impl Into<String>, priority_rank: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            priority_rank,
            color: default_color(),
        }
    }
}

/// Which weekdays carry study slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStructure {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl Default for WeekStructure {
    fn default() -> Self {
        // Monday through Saturday; Sunday is a rest day.
        Self {
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: true,
            sunday: false,
        }
    }
}

impl WeekStructure {
    pub fn is_active(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

/// Validated wizard input for plan generation. Read-only to the allocator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSettings {
    pub start_date: NaiveDate,
    /// Exclusive upper bound of the preparation window.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub buffer_days: u32,
    #[serde(default)]
    pub vacation_days: u32,
    #[serde(default = "default_blocks_per_day")]
    pub blocks_per_day: u32,
    #[serde(default)]
    pub week_structure: WeekStructure,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

pub(crate) fn default_blocks_per_day() -> u32 {
    3
}

/// Raw wizard payload as received from the outside; `start_date` and
/// `end_date` are required and their absence is a client error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub buffer_days: u32,
    #[serde(default)]
    pub vacation_days: u32,
    #[serde(default)]
    pub blocks_per_day: Option<u32>,
    #[serde(default)]
    pub week_structure: Option<WeekStructure>,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl PlanRequest {
    /// Validate required fields and produce allocator-ready settings.
    pub fn into_settings(self) -> Result<PlanSettings, String> {
        let start_date = self.start_date.ok_or("Missing required field: startDate")?;
        let end_date = self.end_date.ok_or("Missing required field: endDate")?;
        Ok(PlanSettings {
            start_date,
            end_date,
            buffer_days: self.buffer_days,
            vacation_days: self.vacation_days,
            blocks_per_day: self.blocks_per_day.unwrap_or_else(default_blocks_per_day),
            week_structure: self.week_structure.unwrap_or_default(),
            topics: self.topics,
        })
    }
}

/// One allocation unit of the generated plan: a topic label with its
/// block count, optionally pinned to a concrete date by placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningDay {
    pub subject: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub rechtsgebiet: String,
    pub blocks: u32,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Provenance of a generated plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub total_calendar_days: usize,
    pub active_learning_days: usize,
    pub net_learning_days: usize,
    pub subjects_count: usize,
}

/// Wire shape of the plan-generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub success: bool,
    pub learning_days: Vec<LearningDay>,
    pub total_days: usize,
    pub metadata: PlanMetadata,
    pub source: PlanSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Injected color assignment for topics without an explicit color.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    colors: Vec<String>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: [
                "bg-blue-500",
                "bg-emerald-500",
                "bg-amber-500",
                "bg-rose-500",
                "bg-violet-500",
                "bg-cyan-500",
                "bg-lime-500",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ColorPalette {
    pub fn color_for(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return DEFAULT_COLOR;
        }
        &self.colors[index % self.colors.len()]
    }
}

/// Injected weekday display names (German by default).
#[derive(Debug, Clone)]
pub struct WeekdayNames {
    names: [String; 7],
}

impl Default for WeekdayNames {
    fn default() -> Self {
        Self {
            names: [
                "Montag",
                "Dienstag",
                "Mittwoch",
                "Donnerstag",
                "Freitag",
                "Samstag",
                "Sonntag",
            ]
            .map(|s| s.to_string()),
        }
    }
}

impl WeekdayNames {
    pub fn name(&self, weekday: Weekday) -> &str {
        &self.names[weekday.num_days_from_monday() as usize]
    }
}
