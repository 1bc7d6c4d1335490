//! SQLite-backed local key/value store.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{LocalStore, StoreError};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open_or_create(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(Self { conn })
    }

    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}

impl LocalStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv(key, value) VALUES(?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn persists_across_reopen() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("lernplan.sqlite");

        {
            let mut store = SqliteStore::open_or_create(&path).expect("open");
            store.set("calendar_slots", "{\"a\":1}").expect("set");
        }

        let store = SqliteStore::open_or_create(&path).expect("reopen");
        assert_eq!(store.get("calendar_slots").expect("get").as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn set_replaces_existing_value() {
        let mut store = SqliteStore::in_memory().expect("open");
        store.set("k", "old").expect("set");
        store.set("k", "new").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("new"));
        assert_eq!(store.keys().expect("keys"), vec!["k".to_string()]);
    }
}
