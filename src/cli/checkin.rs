//! Checkin command implementation.
//!
//! Merges the local and remote record files into one authoritative view
//! and evaluates whether a check-in prompt is due. A missing or unreadable
//! remote file is treated as an empty snapshot, never as a failure; the
//! local copy must not be blocked by a lagging remote.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::checkin::{current_period, is_due};
use crate::config::load_config;
use crate::domain::{DailyRecordMap, EligibilitySettings, Period};
use crate::merge::merge;

#[derive(Args)]
pub struct CheckinArgs {
    /// Local (write-ahead) record map JSON file
    #[arg(short = 'l', long, value_name = "FILE")]
    pub local: Option<PathBuf>,

    /// Remote record map JSON file; unreadable or absent counts as empty
    #[arg(short = 'r', long, value_name = "FILE")]
    pub remote: Option<PathBuf>,

    /// Config file (default: auto-discover lernplan.toml/yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Evaluate at this time instead of now (YYYY-MM-DDTHH:MM)
    #[arg(long, value_name = "DATETIME")]
    pub at: Option<String>,

    /// Prompts per day (1 anchors the single prompt to the morning)
    #[arg(long, value_name = "COUNT")]
    pub daily_prompts: Option<u8>,

    /// Report the merged view without the due evaluation
    #[arg(long)]
    pub no_due: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckinOutput {
    merged: DailyRecordMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    due: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<Period>,
}

pub fn run(args: CheckinArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, args.config.as_deref())?;

    let local = load_records(args.local.as_deref(), "local")?;
    // Remote lag or loss degrades to an empty snapshot.
    let remote = load_records(args.remote.as_deref(), "remote").unwrap_or_else(|e| {
        warn!("remote records unavailable, merging against empty snapshot: {e}");
        DailyRecordMap::new()
    });

    let merged = merge(&local, &remote);

    let (due, period) = if args.no_due {
        (None, None)
    } else {
        let settings = config.checkin.unwrap_or_else(EligibilitySettings::default);
        let daily_prompts = args.daily_prompts.or(config.daily_prompt_count).unwrap_or(2);
        let now = match &args.at {
            Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .with_context(|| format!("Invalid --at value: {raw}"))?,
            None => Local::now().naive_local(),
        };
        let period = current_period(chrono::Timelike::hour(&now), &settings);
        (Some(is_due(&merged, &settings, true, daily_prompts, now)), Some(period))
    };

    let output = CheckinOutput { merged, due, period };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_records(path: Option<&Path>, side: &str) -> Result<DailyRecordMap> {
    let Some(path) = path else {
        return Ok(DailyRecordMap::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed reading {side} records: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid {side} record map: {}", path.display()))
}
