//! Configuration types and file loading.
//!
//! Precedence is CLI > config file > defaults; the loader only handles the
//! file layer, CLI overrides are applied by the subcommands themselves.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::EligibilitySettings;
use crate::provider::ProviderConfig;

pub mod loader;

pub use loader::load_config;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the sqlite local store; defaults to the platform data dir.
    pub store_path: Option<PathBuf>,
    pub blocks_per_day: Option<u32>,
    pub daily_prompt_count: Option<u8>,
    pub checkin: Option<EligibilitySettings>,
    pub provider: ProviderSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        let defaults = ProviderConfig::default();
        Self {
            enabled: false,
            base_url: defaults.base_url,
            api_key: None,
            model: defaults.model,
            timeout_secs: defaults.timeout_secs,
        }
    }
}

impl ProviderSection {
    pub fn to_provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
