//! Reconciliation of local and remote daily check-in records.
//!
//! Local is the write-ahead copy of the user's in-session actions; remote
//! is an eventually-consistent snapshot that may lag behind. The merge is a
//! per-cell union with local precedence: a period the user committed
//! locally is never replaced by an older or absent remote value, while
//! remote-only dates and periods pass through untouched.
//!
//! No timestamps are compared. When two devices edit the same cell offline,
//! whichever sync lands last wins remotely; that last-write-wins gap is
//! accepted behavior, not something this function papers over.

use crate::domain::{DailyRecordMap, DayRecord};

/// Merge `local` over `remote`, cell by cell.
///
/// Argument order matters: local is the overriding side. The result starts
/// as a copy of `remote`; each `(date, period)` cell present in `local`
/// replaces the corresponding cell, nothing else changes.
pub fn merge(local: &DailyRecordMap, remote: &DailyRecordMap) -> DailyRecordMap {
    let mut merged = remote.clone();
    for (date, local_day) in local {
        match merged.get_mut(date) {
            None => {
                merged.insert(date.clone(), local_day.clone());
            }
            Some(day) => {
                if let Some(morning) = &local_day.morning {
                    day.morning = Some(morning.clone());
                }
                if let Some(evening) = &local_day.evening {
                    day.evening = Some(evening.clone());
                }
            }
        }
    }
    merged
}

/// Record a payload in the local copy without touching the other period.
pub fn record_local(
    records: &mut DailyRecordMap,
    date: &str,
    period: crate::domain::Period,
    payload: crate::domain::Payload,
) {
    records.entry(date.to_string()).or_insert_with(DayRecord::default).set(period, payload);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Period;
    use serde_json::json;
    use similar_asserts::assert_eq;

    fn day(morning: Option<serde_json::Value>, evening: Option<serde_json::Value>) -> DayRecord {
        DayRecord { morning, evening }
    }

    #[test]
    fn empty_local_yields_remote_exactly() {
        let local = DailyRecordMap::new();
        let mut remote = DailyRecordMap::new();
        remote.insert("2026-01-10".into(), day(Some(json!({"positivity": 3})), None));

        assert_eq!(merge(&local, &remote), remote);
    }

    #[test]
    fn local_period_wins_over_remote() {
        let mut local = DailyRecordMap::new();
        local.insert("2026-01-11".into(), day(Some(json!({"positivity": 5})), None));
        let mut remote = DailyRecordMap::new();
        remote.insert("2026-01-11".into(), day(Some(json!({"positivity": 2})), None));

        let merged = merge(&local, &remote);
        assert_eq!(merged["2026-01-11"].morning, Some(json!({"positivity": 5})));
    }

    #[test]
    fn remote_other_period_survives_local_override() {
        let mut local = DailyRecordMap::new();
        local.insert("2026-01-11".into(), day(Some(json!({"a": 1})), None));
        let mut remote = DailyRecordMap::new();
        remote.insert("2026-01-11".into(), day(Some(json!({"a": 0})), Some(json!({"b": 9}))));

        let merged = merge(&local, &remote);
        assert_eq!(merged["2026-01-11"].morning, Some(json!({"a": 1})));
        assert_eq!(merged["2026-01-11"].evening, Some(json!({"b": 9})));
    }

    #[test]
    fn local_only_date_is_inserted_whole() {
        let mut local = DailyRecordMap::new();
        local.insert("2026-01-12".into(), day(Some(json!({"a": 1})), Some(json!({"b": 2}))));
        let mut remote = DailyRecordMap::new();
        remote.insert("2026-01-10".into(), day(None, Some(json!({"c": 3}))));

        let merged = merge(&local, &remote);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["2026-01-12"], local["2026-01-12"]);
        assert_eq!(merged["2026-01-10"], remote["2026-01-10"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut local = DailyRecordMap::new();
        local.insert("2026-01-11".into(), day(Some(json!({"a": 5})), None));
        local.insert("2026-01-13".into(), day(None, Some(json!({"b": 1}))));
        let mut remote = DailyRecordMap::new();
        remote.insert("2026-01-11".into(), day(Some(json!({"a": 2})), Some(json!({"x": 0}))));
        remote.insert("2026-01-09".into(), day(Some(json!({"y": 7})), None));

        let once = merge(&local, &remote);
        let twice = merge(&local, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_local_period_is_ever_dropped() {
        let mut local = DailyRecordMap::new();
        for day_no in 1..=9 {
            let date = format!("2026-02-0{day_no}");
            let mut rec = DayRecord::default();
            if day_no % 2 == 0 {
                rec.set(Period::Morning, json!({"m": day_no}));
            }
            if day_no % 3 == 0 {
                rec.set(Period::Evening, json!({"e": day_no}));
            }
            local.insert(date, rec);
        }
        let mut remote = DailyRecordMap::new();
        remote.insert("2026-02-04".into(), day(Some(json!("stale")), Some(json!("stale"))));

        let merged = merge(&local, &remote);
        for (date, rec) in &local {
            if let Some(m) = &rec.morning {
                assert_eq!(merged[date].morning.as_ref(), Some(m), "morning lost at {date}");
            }
            if let Some(e) = &rec.evening {
                assert_eq!(merged[date].evening.as_ref(), Some(e), "evening lost at {date}");
            }
        }
    }

    #[test]
    fn record_local_keeps_sibling_period() {
        let mut records = DailyRecordMap::new();
        record_local(&mut records, "2026-03-01", Period::Morning, json!({"m": 1}));
        record_local(&mut records, "2026-03-01", Period::Evening, json!({"e": 2}));

        assert_eq!(records["2026-03-01"].morning, Some(json!({"m": 1})));
        assert_eq!(records["2026-03-01"].evening, Some(json!({"e": 2})));
    }
}
