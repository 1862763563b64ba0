//! String key-value persistence, shaped like browser local storage.
//!
//! Values are JSON documents. Components own the store they are given;
//! [`MemoryStore`] backs tests.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AbricosError;

/// A flat string-to-string table.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, AbricosError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), AbricosError>;
}

/// Read and decode the JSON value under `key`, `None` when absent.
pub fn read_json<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, AbricosError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), AbricosError> {
    let raw = serde_json::to_string(value)?;
    store.put(key, &raw)
}

/// In-process store. Contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AbricosError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), AbricosError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use sqlite::SqliteStore;

#[cfg(feature = "native")]
mod sqlite {
    use std::path::Path;

    use chrono::Utc;
    use rusqlite::{params, Connection, OptionalExtension};

    use super::KeyValueStore;
    use crate::error::AbricosError;

    const SCHEMA: &str = include_str!("../../../migrations/001_kv.sql");

    /// SQLite-backed store for native hosts.
    pub struct SqliteStore {
        conn: Connection,
    }

    impl SqliteStore {
        /// Open (or create) the database at the given path and run migrations.
        pub fn open(path: &Path) -> Result<Self, AbricosError> {
            let conn = Connection::open(path)?;
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
            conn.execute_batch(SCHEMA)?;
            Ok(Self { conn })
        }

        /// Open an in-memory database (for tests).
        pub fn open_memory() -> Result<Self, AbricosError> {
            let conn = Connection::open_in_memory()?;
            conn.execute_batch(SCHEMA)?;
            Ok(Self { conn })
        }
    }

    impl KeyValueStore for SqliteStore {
        fn get(&self, key: &str) -> Result<Option<String>, AbricosError> {
            self.conn
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get(0)
                })
                .optional()
                .map_err(Into::into)
        }

        fn put(&mut self, key: &str, value: &str) -> Result<(), AbricosError> {
            self.conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &mut impl KeyValueStore) {
        assert_eq!(store.get("users").unwrap(), None);
        store.put("users", "[]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));

        // Overwrite.
        store.put("users", "[1]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("currentUser").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise(&mut MemoryStore::new());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_sqlite_store_in_memory() {
        exercise(&mut SqliteStore::open_memory().unwrap());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abricos.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.put("currentUser", r#"{"id":1}"#).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("currentUser").unwrap().as_deref(),
            Some(r#"{"id":1}"#)
        );
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        assert_eq!(read_json::<Vec<u32>>(&store, "ids").unwrap(), None);
        write_json(&mut store, "ids", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(
            read_json::<Vec<u32>>(&store, "ids").unwrap(),
            Some(vec![1, 2, 3])
        );

        store.put("ids", "not json").unwrap();
        let err = read_json::<Vec<u32>>(&store, "ids").unwrap_err();
        assert!(matches!(err, AbricosError::Serialization(_)));
    }
}
