//! One-time key migration for the local persisted store.
//!
//! Versioned and idempotent: a stored `migration_version` at or above the
//! current version makes the whole pass a no-op, and the marker is written
//! unconditionally after every pass so repeated runs stay cheap. Old keys
//! are copied, never deleted; deletion is the separate opt-in [`cleanup`].

use serde::Serialize;
use tracing::{debug, warn};

use super::{LocalStore, StoreError};

pub const MIGRATION_VERSION: i64 = 2;
pub const VERSION_KEY: &str = "migration_version";

/// Fixed old-key to new-key rename table.
pub const RENAMES: [(&str, &str); 3] = [
    ("calendar_slots", "calendar_blocks"),
    ("private_blocks", "private_sessions"),
    ("time_blocks", "time_sessions"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub previous_version: i64,
    pub version: i64,
    /// Old keys whose values were copied to their new key this run.
    pub copied: Vec<String>,
    /// Key pairs skipped because of a read or write failure.
    pub skipped: Vec<String>,
    pub was_noop: bool,
}

/// Per-pair migration state as exposed by the status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    pub old_key: String,
    pub new_key: String,
    pub old_exists: bool,
    pub new_exists: bool,
    pub complete: bool,
}

fn stored_version(store: &dyn LocalStore) -> i64 {
    match store.get(VERSION_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
        Ok(None) => 0,
        Err(err) => {
            warn!("could not read {VERSION_KEY}, assuming unmigrated: {err}");
            0
        }
    }
}

/// Run the rename migration.
///
/// Copy semantics per pair: old present and new absent copies old to new;
/// both present leaves both untouched; anything else is a no-op for that
/// pair. A read or write failure skips the pair and the pass still
/// completes, so a flaky store cannot cause a retry storm.
pub fn migrate(store: &mut dyn LocalStore) -> MigrationReport {
    let previous_version = stored_version(store);
    if previous_version >= MIGRATION_VERSION {
        debug!("store already at migration version {previous_version}, nothing to do");
        return MigrationReport {
            previous_version,
            version: previous_version,
            copied: Vec::new(),
            skipped: Vec::new(),
            was_noop: true,
        };
    }

    let mut copied = Vec::new();
    let mut skipped = Vec::new();
    for (old_key, new_key) in RENAMES {
        match (store.get(old_key), store.get(new_key)) {
            (Ok(Some(value)), Ok(None)) => match store.set(new_key, &value) {
                Ok(()) => {
                    debug!("migrated {old_key} -> {new_key}");
                    copied.push(old_key.to_string());
                }
                Err(err) => {
                    warn!("skipping {old_key} -> {new_key}, write failed: {err}");
                    skipped.push(old_key.to_string());
                }
            },
            (Ok(_), Ok(_)) => {}
            (Err(err), _) | (_, Err(err)) => {
                warn!("skipping {old_key} -> {new_key}, read failed: {err}");
                skipped.push(old_key.to_string());
            }
        }
    }

    // Marker is written even when zero pairs needed work.
    if let Err(err) = store.set(VERSION_KEY, &MIGRATION_VERSION.to_string()) {
        warn!("could not persist {VERSION_KEY}: {err}");
    }

    MigrationReport {
        previous_version,
        version: MIGRATION_VERSION,
        copied,
        skipped,
        was_noop: false,
    }
}

/// Per-pair view of what exists where. A pair is complete once only the
/// new key holds a value.
pub fn migration_status(store: &dyn LocalStore) -> Result<Vec<KeyStatus>, StoreError> {
    RENAMES
        .iter()
        .map(|(old_key, new_key)| {
            let old_exists = store.get(old_key)?.is_some();
            let new_exists = store.get(new_key)?.is_some();
            Ok(KeyStatus {
                old_key: old_key.to_string(),
                new_key: new_key.to_string(),
                old_exists,
                new_exists,
                complete: !old_exists && new_exists,
            })
        })
        .collect()
}

/// Explicitly delete old keys whose values have been copied. Returns the
/// removed keys. Pairs where the new key is absent are left alone.
pub fn cleanup(store: &mut dyn LocalStore) -> Result<Vec<String>, StoreError> {
    let mut removed = Vec::new();
    for (old_key, new_key) in RENAMES {
        if store.get(old_key)?.is_some() && store.get(new_key)?.is_some() {
            store.remove(old_key)?;
            removed.push(old_key.to_string());
        }
    }
    Ok(removed)
}
