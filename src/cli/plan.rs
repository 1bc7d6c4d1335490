//! Plan command implementation.
//!
//! This is the plan-generation endpoint of the system: a WizardData-shaped
//! JSON payload in, a `PlanResponse` JSON document on stdout. Missing
//! `startDate`/`endDate` is a client error and exits non-zero with a
//! descriptive message; provider trouble never does, it degrades to the
//! deterministic local plan.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::load_config;
use crate::domain::{ColorPalette, PlanRequest};
use crate::plan::generate_plan;
use crate::provider::{HttpSuggestionProvider, SuggestionProvider};

use super::utils::read_input;

#[derive(Args)]
pub struct PlanArgs {
    /// Wizard payload JSON file ('-' or absent reads stdin)
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Config file (default: auto-discover lernplan.toml/yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ask the configured suggestion provider first instead of going
    /// straight to the local allocator
    #[arg(long)]
    pub ai: bool,

    /// Pretty-print the response JSON
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: PlanArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, args.config.as_deref())?;

    let payload = read_input(args.input.as_deref())?;
    let mut request: PlanRequest =
        serde_json::from_str(&payload).map_err(|e| anyhow::anyhow!("Invalid plan payload: {e}"))?;

    // Config default applies only when the payload omits blocksPerDay.
    if request.blocks_per_day.is_none() {
        request.blocks_per_day = config.blocks_per_day;
    }

    let settings = match request.into_settings() {
        Ok(s) => s,
        Err(msg) => anyhow::bail!(msg),
    };

    let provider;
    let provider_ref: Option<&dyn SuggestionProvider> = if args.ai || config.provider.enabled {
        provider = HttpSuggestionProvider::new(config.provider.to_provider_config());
        Some(&provider)
    } else {
        None
    };

    let response = generate_plan(&settings, provider_ref, &ColorPalette::default());

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{rendered}");
    Ok(())
}
