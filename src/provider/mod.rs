//! Pluggable plan-suggestion provider.
//!
//! A provider turns plan settings into a list of suggested day entries,
//! usually via a text-completion model. Every failure mode here is
//! recoverable: the caller substitutes the deterministic local allocation
//! and carries the reason along as a message, so nothing in this module
//! ever propagates to the top level as a hard error.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::PlanSettings;

pub mod http;

pub use http::{HttpSuggestionProvider, ProviderConfig};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API credentials configured")]
    MissingCredentials,

    #[error("suggestion request failed: {0}")]
    Request(String),

    #[error("suggestion request timed out after {0}s")]
    Timeout(u64),

    #[error("suggestion response did not contain a JSON array of entries")]
    InvalidResponse,
}

/// One suggested plan entry as emitted by the model.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SuggestionEntry {
    pub subject: String,
    pub theme: String,
    pub rechtsgebiet: String,
    pub blocks: Option<u32>,
}

pub trait SuggestionProvider {
    fn suggest(&self, settings: &PlanSettings) -> Result<Vec<SuggestionEntry>, ProviderError>;
}

/// Pull the first top-level JSON array out of free-form model output and
/// parse it into entries.
///
/// Models wrap their answer in prose or code fences more often than not,
/// so the array substring between the first `[` and the last `]` is what
/// gets parsed. Anything that is not an array, fails to parse, or parses
/// to zero entries is an [`ProviderError::InvalidResponse`].
pub fn parse_entries(text: &str) -> Result<Vec<SuggestionEntry>, ProviderError> {
    let start = text.find('[').ok_or(ProviderError::InvalidResponse)?;
    let end = text.rfind(']').filter(|&e| e > start).ok_or(ProviderError::InvalidResponse)?;

    let value: serde_json::Value =
        serde_json::from_str(&text[start..=end]).map_err(|_| ProviderError::InvalidResponse)?;
    let array = value.as_array().ok_or(ProviderError::InvalidResponse)?;
    if array.is_empty() {
        return Err(ProviderError::InvalidResponse);
    }

    array
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone()).map_err(|_| ProviderError::InvalidResponse)
        })
        .collect()
}

/// Render settings into the generation prompt sent to the model.
pub fn render_prompt(settings: &PlanSettings) -> String {
    let summary = crate::plan::summarize_calendar(settings);
    let subjects = if settings.topics.is_empty() {
        "Grundlagen".to_string()
    } else {
        settings
            .topics
            .iter()
            .map(|t| {
                if t.category.is_empty() {
                    t.name.clone()
                } else {
                    format!("{} ({})", t.name, t.category)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Erstelle einen Lernplan für das juristische Examen.\n\
         Zeitraum: {} bis {} ({} Lerntage netto, {} Blöcke pro Tag).\n\
         Fächer in Prioritätsreihenfolge: {}.\n\
         Antworte ausschließlich mit einem JSON-Array von Objekten der Form\n\
         {{\"subject\": string, \"theme\": string, \"rechtsgebiet\": string, \"blocks\": number}}\n\
         mit genau einem Objekt pro Lerntag, ohne weiteren Text.",
        settings.start_date, settings.end_date, summary.net_learning_days,
        settings.blocks_per_day, subjects,
    )
}
