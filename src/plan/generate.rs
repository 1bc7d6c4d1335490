//! Plan generation with provider fallback.
//!
//! The provider result is consumed only after validation and topic
//! reconciliation; any provider error degrades to the deterministic local
//! allocation with the reason preserved in the response message.

use tracing::warn;

use crate::domain::{
    ColorPalette, LearningDay, PlanMetadata, PlanResponse, PlanSettings, PlanSource, SlotBoard,
    Topic, DEFAULT_COLOR,
};
use crate::provider::{SuggestionEntry, SuggestionProvider};

use super::allocator::{allocate, summarize_calendar, AllocationUnit};
use super::placement::place_units;

/// Generate a complete plan response from wizard settings.
///
/// With a provider, its suggestion is tried first and labeled `ai`; on any
/// provider error the local allocation is substituted and labeled
/// `fallback`, with a human-readable reason in `message`. Without a
/// provider the local path runs directly.
pub fn generate_plan(
    settings: &PlanSettings,
    provider: Option<&dyn SuggestionProvider>,
    palette: &ColorPalette,
) -> PlanResponse {
    let summary = summarize_calendar(settings);

    let (mut units, source, message) = match provider {
        Some(p) => match p.suggest(settings) {
            Ok(entries) => (reconcile_entries(&entries, settings), PlanSource::Ai, None),
            Err(err) => {
                warn!("plan suggestion failed, using local allocation: {err}");
                (
                    allocate(settings, palette),
                    PlanSource::Fallback,
                    Some(format!("KI-Vorschlag nicht verfügbar ({err}); lokaler Plan verwendet.")),
                )
            }
        },
        None => (allocate(settings, palette), PlanSource::Fallback, None),
    };

    let mut board = SlotBoard::new(super::active_days(settings), settings.blocks_per_day);
    place_units(&mut board, &mut units);

    let learning_days: Vec<LearningDay> = units.into_iter().map(|u| u.day).collect();
    PlanResponse {
        success: true,
        total_days: learning_days.len(),
        metadata: PlanMetadata {
            total_calendar_days: summary.total_calendar_days,
            active_learning_days: summary.active_learning_days,
            net_learning_days: summary.net_learning_days,
            subjects_count: settings.topics.len(),
        },
        learning_days,
        source,
        message,
    }
}

/// Reconcile suggested entries against the known topic list.
///
/// Topic match is exact name first, then substring in either direction;
/// a match recovers category and color metadata. Unmatched entries keep
/// explicit defaults rather than inheriting anything implicitly.
pub fn reconcile_entries(
    entries: &[SuggestionEntry],
    settings: &PlanSettings,
) -> Vec<AllocationUnit> {
    entries
        .iter()
        .map(|entry| {
            let matched = match_topic(&entry.subject, &settings.topics);
            let (topic_id, rechtsgebiet, color) = match matched {
                Some(topic) => {
                    let category = if entry.rechtsgebiet.is_empty() {
                        topic.category.clone()
                    } else {
                        entry.rechtsgebiet.clone()
                    };
                    (topic.id.clone(), category, topic.color.clone())
                }
                None => (
                    entry.subject.to_lowercase(),
                    entry.rechtsgebiet.clone(),
                    DEFAULT_COLOR.to_string(),
                ),
            };
            AllocationUnit {
                topic_id,
                day: LearningDay {
                    subject: entry.subject.clone(),
                    theme: entry.theme.clone(),
                    rechtsgebiet,
                    blocks: entry.blocks.unwrap_or(settings.blocks_per_day),
                    color,
                    date: None,
                },
            }
        })
        .collect()
}

fn match_topic<'a>(subject: &str, topics: &'a [Topic]) -> Option<&'a Topic> {
    let needle = subject.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    topics
        .iter()
        .find(|t| t.name.to_lowercase() == needle)
        .or_else(|| {
            topics.iter().find(|t| {
                let name = t.name.to_lowercase();
                name.contains(&needle) || needle.contains(&name)
            })
        })
}
