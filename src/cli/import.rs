//! Import command implementation.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::import::parse_schedule;

use super::utils::read_input;

#[derive(Args)]
pub struct ImportArgs {
    /// Schedule text file ('-' reads stdin)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Pretty-print the result JSON
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ImportArgs) -> Result<()> {
    let content = read_input(args.file.as_deref())?;
    let parsed = parse_schedule(content.lines());

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&parsed)?
    } else {
        serde_json::to_string(&parsed)?
    };
    println!("{rendered}");
    Ok(())
}
