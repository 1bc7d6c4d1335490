//! Check-in prompt eligibility.
//!
//! A stateless decision over the merged record view: given the settings and
//! the current time, is a prompt due right now? No state is persisted here;
//! every evaluation derives the answer from scratch.

use chrono::{NaiveDateTime, Timelike};

use crate::domain::{DailyRecordMap, EligibilitySettings, Period, Timing};

/// Period the given hour falls into. The boundary hour counts as evening:
/// `evening_hour = 18` means 17:59 is morning and 18:00 is evening.
pub fn current_period(now_hour: u32, settings: &EligibilitySettings) -> Period {
    if now_hour >= settings.evening_hour {
        Period::Evening
    } else {
        Period::Morning
    }
}

/// Whether a check-in prompt is due at `now`.
///
/// `daily_prompt_count` of 1 anchors the single prompt to the morning, so
/// the evening period is never eligible in that mode.
pub fn is_due(
    merged: &DailyRecordMap,
    settings: &EligibilitySettings,
    feature_active: bool,
    daily_prompt_count: u8,
    now: NaiveDateTime,
) -> bool {
    if !feature_active {
        return false;
    }

    let period = current_period(now.hour(), settings);

    if daily_prompt_count == 1 && period == Period::Evening {
        return false;
    }

    match settings.timing {
        Timing::Both => {}
        Timing::Morning if period == Period::Morning => {}
        Timing::Evening if period == Period::Evening => {}
        _ => return false,
    }

    let today = now.date().format("%Y-%m-%d").to_string();
    let already_done =
        merged.get(&today).and_then(|day| day.get(period)).is_some();

    !already_done
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DayRecord;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 15)
            .expect("valid date")
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
    }

    fn settings() -> EligibilitySettings {
        EligibilitySettings::default()
    }

    #[test]
    fn inactive_feature_is_never_due() {
        assert!(!is_due(&DailyRecordMap::new(), &settings(), false, 2, at(9)));
    }

    #[test]
    fn due_when_period_unanswered() {
        assert!(is_due(&DailyRecordMap::new(), &settings(), true, 2, at(9)));
        assert!(is_due(&DailyRecordMap::new(), &settings(), true, 2, at(20)));
    }

    #[test]
    fn evening_boundary_hour_counts_as_evening() {
        let s = settings();
        assert_eq!(current_period(17, &s), Period::Morning);
        assert_eq!(current_period(18, &s), Period::Evening);
    }

    #[test]
    fn single_prompt_mode_never_fires_in_the_evening() {
        assert!(!is_due(&DailyRecordMap::new(), &settings(), true, 1, at(18)));
        assert!(!is_due(&DailyRecordMap::new(), &settings(), true, 1, at(23)));
        assert!(is_due(&DailyRecordMap::new(), &settings(), true, 1, at(9)));
    }

    #[test]
    fn timing_restriction_blocks_other_period() {
        let s = EligibilitySettings { timing: Timing::Evening, ..settings() };
        assert!(!is_due(&DailyRecordMap::new(), &s, true, 2, at(10)));
        assert!(is_due(&DailyRecordMap::new(), &s, true, 2, at(19)));

        let s = EligibilitySettings { timing: Timing::Morning, ..settings() };
        assert!(!is_due(&DailyRecordMap::new(), &s, true, 2, at(19)));
    }

    #[test]
    fn completed_period_is_not_due_again() {
        let mut merged = DailyRecordMap::new();
        let mut day = DayRecord::default();
        day.set(Period::Morning, json!({"positivity": 4}));
        merged.insert("2026-01-15".into(), day);

        assert!(!is_due(&merged, &settings(), true, 2, at(9)));
        // Evening of the same day is still open.
        assert!(is_due(&merged, &settings(), true, 2, at(19)));
    }

    #[test]
    fn other_days_do_not_shadow_today() {
        let mut merged = DailyRecordMap::new();
        let mut day = DayRecord::default();
        day.set(Period::Morning, json!({"positivity": 4}));
        merged.insert("2026-01-14".into(), day);

        assert!(is_due(&merged, &settings(), true, 2, at(9)));
    }
}
