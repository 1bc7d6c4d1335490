//! Plan generation: deterministic slot allocation plus the AI-assisted
//! variant with validated fallback.

use chrono::NaiveDate;

use crate::domain::PlanSettings;

pub mod allocator;
pub mod generate;
pub mod placement;

pub use allocator::{allocate, summarize_calendar, AllocationUnit, CalendarSummary};
pub use generate::generate_plan;
pub use placement::place_units;

/// All calendar days in `[start_date, end_date)`.
pub fn calendar_days(settings: &PlanSettings) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = settings.start_date;
    while day < settings.end_date {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// The subset of calendar days whose weekday is active.
pub fn active_days(settings: &PlanSettings) -> Vec<NaiveDate> {
    calendar_days(settings)
        .into_iter()
        .filter(|d| settings.week_structure.is_active(chrono::Datelike::weekday(d)))
        .collect()
}
