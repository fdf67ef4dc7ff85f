use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use super::{KeyPage, Result, Store, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL
) WITHOUT ROWID";

/// Single-table SQLite store. Keys compare with SQLite's default BINARY
/// collation, which is byte order.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl Store for SqliteStore {
    fn list_page(&self, after: &str, limit: usize) -> Result<KeyPage> {
        if limit == 0 {
            return Ok(KeyPage::default());
        }
        let probe = i64::try_from(limit.saturating_add(1)).unwrap_or(i64::MAX);
        let conn = self.conn.lock();
        let keys = if after.is_empty() {
            let mut stmt = conn.prepare_cached("SELECT key FROM kv ORDER BY key LIMIT ?1")?;
            let rows = stmt.query_map(params![probe], |row| row.get::<_, String>(0))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        } else {
            let mut stmt =
                conn.prepare_cached("SELECT key FROM kv WHERE key > ?1 ORDER BY key LIMIT ?2")?;
            let rows = stmt.query_map(params![after, probe], |row| row.get::<_, String>(0))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(KeyPage::from_probe(keys, limit))
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let conn = self.conn.lock();
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get::<_, Vec<u8>>(0)
        })
        .optional()?
        .ok_or_else(|| StoreError::not_found(key))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn for_each_key(&self, visit: &mut dyn FnMut(&str)) -> Result<()> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            visit(&key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        for key in ["b:1", "a:2", "a:1", "noprefix", "c"] {
            store.set(key, key.as_bytes()).unwrap();
        }
        store
    }

    #[test]
    fn pages_are_ordered_and_chained() {
        let store = seeded();
        let first = store.list_page("", 2).unwrap();
        assert_eq!(first.items, vec!["a:1", "a:2"]);
        assert!(first.has_more);
        let second = store.list_page(&first.cursor_after, 2).unwrap();
        assert_eq!(second.items, vec!["b:1", "c"]);
        assert!(second.has_more);
        let third = store.list_page(&second.cursor_after, 2).unwrap();
        assert_eq!(third.items, vec!["noprefix"]);
        assert!(!third.has_more);
    }

    #[test]
    fn unbounded_limit_returns_everything() {
        let page = seeded().list_page("", usize::MAX).unwrap();
        assert_eq!(page.items.len(), 5);
        assert!(!page.has_more);
    }

    #[test]
    fn set_overwrites_and_get_returns_bytes() {
        let store = seeded();
        store.set("c", &[0, 159, 146, 150]).unwrap();
        assert_eq!(store.get("c").unwrap(), vec![0, 159, 146, 150]);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = seeded();
        assert!(store.get("zzz").unwrap_err().is_not_found());
    }

    #[test]
    fn delete_removes_and_tolerates_missing() {
        let store = seeded();
        store.delete("c").unwrap();
        store.delete("c").unwrap();
        assert!(store.get("c").unwrap_err().is_not_found());
    }

    #[test]
    fn scans_use_single_query_override() {
        let store = seeded();
        assert_eq!(store.count_matching("a").unwrap(), 2);
        let groups = store.group_counts().unwrap();
        assert_eq!(groups.get("a"), Some(&2));
        assert_eq!(groups.get("(no prefix)"), Some(&2));
    }

    #[test]
    fn reopen_file_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("persisted", b"yes").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("persisted").unwrap(), b"yes");
    }
}
