//! Line-based schedule text import.
//!
//! Heuristic extraction from OCR-style text: one subject label, dated
//! topic entries (`DD.MM.YYYY` plus free text, leading ordinal stripped),
//! and holiday hints matched by a fixed keyword set. Header lines are
//! discarded; anything unrecognized lands in `unparsed` for manual review.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    // Optional leading ordinal ("12. "), then DD.MM.YYYY, then topic text.
    Regex::new(r"^\s*(?:\d{1,3}\.\s+)?(\d{2})\.(\d{2})\.(\d{4})\s+(.+?)\s*$")
        .expect("valid entry regex")
});

static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:fach|rechtsgebiet)\s*:\s*(.+?)\s*$").expect("valid subject regex")
});

const HOLIDAY_KEYWORDS: [&str; 5] = ["ferien", "feiertag", "urlaub", "puffertag", "frei"];

const HEADER_KEYWORDS: [&str; 6] =
    ["lernplan", "stundenplan", "übersicht", "woche", "datum", "thema"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicEntry {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleImport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub entries: Vec<TopicEntry>,
    pub holidays: Vec<String>,
    pub unparsed: Vec<String>,
}

/// Parse raw schedule lines into structured form. Never fails; the worst
/// case is everything ending up in `unparsed`.
pub fn parse_schedule<'a, I: IntoIterator<Item = &'a str>>(lines: I) -> ScheduleImport {
    let mut result = ScheduleImport::default();

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = SUBJECT_RE.captures(line) {
            if result.subject.is_none() {
                result.subject = Some(caps[1].to_string());
            }
            continue;
        }

        if let Some(caps) = ENTRY_RE.captures(line) {
            let (day, month, year) = (&caps[1], &caps[2], &caps[3]);
            let parsed = NaiveDate::parse_from_str(
                &format!("{day}.{month}.{year}"),
                "%d.%m.%Y",
            );
            match parsed {
                Ok(date) => {
                    result.entries.push(TopicEntry { date, name: caps[4].to_string() });
                    continue;
                }
                Err(_) => {
                    // Looks like a date but is not one (e.g. 31.02.): manual review.
                    result.unparsed.push(line.to_string());
                    continue;
                }
            }
        }

        let lowered = line.to_lowercase();
        if HOLIDAY_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            result.holidays.push(line.to_string());
            continue;
        }
        if HEADER_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }

        if result.subject.is_none() {
            result.subject = Some(line.to_string());
        } else {
            result.unparsed.push(line.to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).expect("date")
    }

    #[test]
    fn extracts_dated_entries() {
        let import = parse_schedule(["02.03.2026 BGB AT", "03.03.2026 Schuldrecht"]);
        assert_eq!(
            import.entries,
            vec![
                TopicEntry { date: d(2, 3), name: "BGB AT".into() },
                TopicEntry { date: d(3, 3), name: "Schuldrecht".into() },
            ]
        );
        assert!(import.unparsed.is_empty());
    }

    #[test]
    fn strips_leading_ordinal() {
        let import = parse_schedule(["12. 02.03.2026 Sachenrecht"]);
        assert_eq!(import.entries[0].name, "Sachenrecht");
        assert_eq!(import.entries[0].date, d(2, 3));
    }

    #[test]
    fn first_free_line_becomes_subject() {
        let import = parse_schedule(["Zivilrecht", "02.03.2026 BGB AT", "irgendwas anderes"]);
        assert_eq!(import.subject.as_deref(), Some("Zivilrecht"));
        assert_eq!(import.unparsed, vec!["irgendwas anderes".to_string()]);
    }

    #[test]
    fn explicit_subject_prefix_wins() {
        let import = parse_schedule(["Fach: Strafrecht", "Notizen dazu"]);
        assert_eq!(import.subject.as_deref(), Some("Strafrecht"));
        assert_eq!(import.unparsed, vec!["Notizen dazu".to_string()]);
    }

    #[test]
    fn holiday_keywords_collect_hints() {
        let import = parse_schedule(["Osterferien bis 10.04.", "Feiertag", "02.03.2026 BGB AT"]);
        assert_eq!(import.holidays.len(), 2);
        assert_eq!(import.entries.len(), 1);
    }

    #[test]
    fn header_lines_are_discarded() {
        let import = parse_schedule(["Lernplan Woche 3", "Datum  Thema", "02.03.2026 BGB AT"]);
        assert!(import.subject.is_none());
        assert!(import.unparsed.is_empty());
        assert_eq!(import.entries.len(), 1);
    }

    #[test]
    fn impossible_date_goes_to_unparsed() {
        let import = parse_schedule(["31.02.2026 Phantomtag"]);
        assert!(import.entries.is_empty());
        assert_eq!(import.unparsed, vec!["31.02.2026 Phantomtag".to_string()]);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let import = parse_schedule(["", "   ", "02.03.2026 BGB AT", ""]);
        assert_eq!(import.entries.len(), 1);
        assert!(import.unparsed.is_empty());
    }
}
