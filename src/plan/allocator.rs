//! Deterministic greedy topic allocation.
//!
//! Net learning days are distributed over the prioritized topic list by
//! floor division; the remainder goes one extra day each to the
//! highest-priority topics. The tie-break is positional, never random, so
//! the same input always yields the same plan.

use serde::Serialize;

use crate::domain::{ColorPalette, LearningDay, PlanSettings, Topic, TopicId};

/// Day counts derived from the preparation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarSummary {
    pub total_calendar_days: usize,
    pub active_learning_days: usize,
    pub net_learning_days: usize,
}

pub fn summarize_calendar(settings: &PlanSettings) -> CalendarSummary {
    let total = super::calendar_days(settings).len();
    let active = super::active_days(settings).len();
    let excluded = (settings.buffer_days + settings.vacation_days) as usize;
    CalendarSummary {
        total_calendar_days: total,
        active_learning_days: active,
        net_learning_days: active.saturating_sub(excluded),
    }
}

/// One allocation unit: a learning day tied back to its topic identity so
/// placement can stamp slot occupants.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationUnit {
    pub topic_id: TopicId,
    pub day: LearningDay,
}

/// Distribute net learning days across topics in priority order.
///
/// An empty topic list is substituted with a single "Grundlagen"
/// placeholder so a generated plan is never empty when days are available.
/// Zero net days yields an empty sequence, which is a valid result.
pub fn allocate(settings: &PlanSettings, palette: &ColorPalette) -> Vec<AllocationUnit> {
    let summary = summarize_calendar(settings);
    let net_days = summary.net_learning_days;
    if net_days == 0 {
        return Vec::new();
    }

    let placeholder;
    let topics: Vec<&Topic> = if settings.topics.is_empty() {
        placeholder = Topic::new("grundlagen", "Grundlagen", 0);
        vec![&placeholder]
    } else {
        let mut sorted: Vec<&Topic> = settings.topics.iter().collect();
        sorted.sort_by_key(|t| t.priority_rank);
        sorted
    };

    let count = topics.len();
    let days_per_topic = net_days / count;
    let extra = net_days % count;

    let mut units = Vec::with_capacity(net_days);
    for (rank, topic) in topics.iter().enumerate() {
        let unit_count = days_per_topic + usize::from(rank < extra);
        let color = if topic.color == crate::domain::DEFAULT_COLOR {
            palette.color_for(rank).to_string()
        } else {
            topic.color.clone()
        };
        for part in 0..unit_count {
            let subject = if part == 0 {
                topic.name.clone()
            } else {
                format!("{} — Teil {}", topic.name, part + 1)
            };
            units.push(AllocationUnit {
                topic_id: topic.id.clone(),
                day: LearningDay {
                    subject,
                    theme: String::new(),
                    rechtsgebiet: topic.category.clone(),
                    blocks: settings.blocks_per_day,
                    color: color.clone(),
                    date: None,
                },
            });
        }
    }
    units
}
