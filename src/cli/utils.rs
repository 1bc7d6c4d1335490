//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a file, or stdin when the path is `-` or absent.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Failed reading input file: {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed reading stdin")?;
            Ok(buf)
        }
    }
}

/// Default location of the sqlite local store.
pub fn default_store_path() -> Option<PathBuf> {
    data_root_dir().map(|base| base.join("lernplan").join("store.sqlite"))
}

fn data_root_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return Some(PathBuf::from(xdg));
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    }
}
