//! Migrate command implementation.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::load_config;
use crate::store::{cleanup, migrate, migration_status, SqliteStore};

use super::utils::default_store_path;

#[derive(Args)]
pub struct MigrateArgs {
    /// Path of the sqlite local store (default: platform data dir)
    #[arg(short = 's', long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Config file (default: auto-discover lernplan.toml/yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report per-key migration state instead of migrating
    #[arg(long)]
    pub status: bool,

    /// Delete old keys whose values were copied (explicit opt-in)
    #[arg(long)]
    pub cleanup: bool,
}

pub fn run(args: MigrateArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, args.config.as_deref())?;

    let store_path = args
        .store
        .or(config.store_path)
        .or_else(default_store_path)
        .ok_or_else(|| anyhow::anyhow!("No store path given and no data directory found"))?;
    if let Some(parent) = store_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut store = SqliteStore::open_or_create(&store_path)
        .map_err(|e| anyhow::anyhow!("Cannot open store {}: {e}", store_path.display()))?;

    if args.status {
        let status = migration_status(&store)
            .map_err(|e| anyhow::anyhow!("Cannot read migration status: {e}"))?;
        for pair in &status {
            let state = if pair.complete {
                "complete"
            } else if pair.old_exists && pair.new_exists {
                "both present"
            } else if pair.old_exists {
                "pending"
            } else {
                "nothing to migrate"
            };
            println!(
                "{} -> {}: {} (old: {}, new: {})",
                pair.old_key, pair.new_key, state, pair.old_exists, pair.new_exists
            );
        }
        return Ok(());
    }

    let report = migrate(&mut store);
    if report.was_noop {
        println!("Store already at migration version {}", report.version);
    } else {
        println!(
            "Migrated to version {} ({} key(s) copied, {} skipped)",
            report.version,
            report.copied.len(),
            report.skipped.len()
        );
        for key in &report.copied {
            println!("  copied {key}");
        }
    }

    if args.cleanup {
        let removed =
            cleanup(&mut store).map_err(|e| anyhow::anyhow!("Cleanup failed: {e}"))?;
        match removed.len() {
            0 => println!("Cleanup: no old keys eligible for removal"),
            n => {
                println!("Cleanup: removed {n} old key(s)");
                for key in &removed {
                    println!("  removed {key}");
                }
            }
        }
    }

    Ok(())
}
