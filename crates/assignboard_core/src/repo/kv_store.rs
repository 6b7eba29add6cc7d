//! Durable key-value storage contract with SQLite and in-memory backends.
//!
//! # Invariants
//! - `put` replaces any previous value for the key.
//! - `get` on an unknown key returns `Ok(None)`.

pub use crate::db::{StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// String-keyed durable storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// `kv_entries`-table store over an owned, migrated connection.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKvStore, SqliteKvStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn sqlite_put_overwrites_previous_value() {
        let store = SqliteKvStore::new(open_db_in_memory().expect("open in-memory db"));
        assert_eq!(store.get("k").expect("get"), None);

        store.put("k", "one").expect("first put");
        store.put("k", "two").expect("second put");
        assert_eq!(store.get("k").expect("get"), Some("two".to_string()));

        let rows: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .expect("count rows");
        assert_eq!(rows, 1);
    }

    #[test]
    fn memory_store_roundtrips() {
        let store = MemoryKvStore::new();
        store.put("k", "v").expect("put");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v"));
    }
}
