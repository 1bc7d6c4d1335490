//! Blocking HTTP suggestion provider for OpenAI-compatible completion APIs.

use std::time::Duration;

use serde_json::json;

use crate::domain::PlanSettings;

use super::{parse_entries, render_prompt, ProviderError, SuggestionEntry, SuggestionProvider};

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-4o-mini".into(),
            timeout_secs: 30,
        }
    }
}

pub struct HttpSuggestionProvider {
    config: ProviderConfig,
}

impl HttpSuggestionProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl SuggestionProvider for HttpSuggestionProvider {
    fn suggest(&self, settings: &PlanSettings) -> Result<Vec<SuggestionEntry>, ProviderError> {
        let api_key = self.config.api_key.as_deref().ok_or(ProviderError::MissingCredentials)?;

        let url = format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'));
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build();

        let response = agent
            .post(&url)
            .set("Authorization", &format!("Bearer {api_key}"))
            .send_json(json!({
                "model": self.config.model,
                "messages": [{"role": "user", "content": render_prompt(settings)}],
                "temperature": 0.4,
            }))
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    ProviderError::Request(format!("provider returned status {code}"))
                }
                ureq::Error::Transport(t) => {
                    if t.to_string().contains("timed out") {
                        ProviderError::Timeout(self.config.timeout_secs)
                    } else {
                        ProviderError::Request(t.to_string())
                    }
                }
            })?;

        let body: serde_json::Value = response
            .into_json()
            .map_err(|e| ProviderError::Request(format!("unreadable response body: {e}")))?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::InvalidResponse)?;

        parse_entries(content)
    }
}
