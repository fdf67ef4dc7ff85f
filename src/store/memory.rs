use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use super::{KeyPage, Result, Store, StoreError};

/// Ordered in-memory store. Used for `--memory` sessions and as the test
/// double for the app state machine.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, Vec<u8>>>,
    faults: RwLock<Faults>,
}

#[derive(Debug, Default)]
struct Faults {
    list: bool,
    set: bool,
    deletes_before_failure: Option<usize>,
}

impl MemoryStore {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: AsRef<[u8]>,
        I: IntoIterator<Item = (K, V)>,
    {
        let records = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.as_ref().to_vec()))
            .collect();
        Self {
            records: RwLock::new(records),
            faults: RwLock::default(),
        }
    }

    /// A small keyspace for trying the UI without a database file.
    pub fn demo() -> Self {
        let mut pairs: Vec<(String, Vec<u8>)> = vec![
            (
                "config:app".into(),
                br#"{"name":"kvpeek","debug":false,"retries":3,"tags":["tui","kv"]}"#.to_vec(),
            ),
            ("config:motd".into(), b"hello from kvpeek".to_vec()),
            ("blob:header".into(), vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]),
            ("readme".into(), b"keys without a colon land in (no prefix)".to_vec()),
        ];
        for i in 0..1200 {
            pairs.push((
                format!("user:{i:04}"),
                format!(r#"{{"id":{i},"name":"user {i}","active":{}}}"#, i % 3 != 0).into_bytes(),
            ));
        }
        for i in 0..250 {
            pairs.push((format!("session:{i:04}"), format!("token-{i:08x}").into_bytes()));
        }
        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.records.read().keys().cloned().collect()
    }

    /// Make every `list_page` call fail.
    pub fn fail_list(&self, fail: bool) {
        self.faults.write().list = fail;
    }

    /// Make every `set` call fail.
    pub fn fail_set(&self, fail: bool) {
        self.faults.write().set = fail;
    }

    /// Allow `n` more deletes, then fail every later one.
    pub fn fail_deletes_after(&self, n: usize) {
        self.faults.write().deletes_before_failure = Some(n);
    }
}

impl Store for MemoryStore {
    fn list_page(&self, after: &str, limit: usize) -> Result<KeyPage> {
        if self.faults.read().list {
            return Err(StoreError::io("list keys failed", "injected failure"));
        }
        if limit == 0 {
            return Ok(KeyPage::default());
        }
        let records = self.records.read();
        let lower = if after.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(after)
        };
        let probe: Vec<String> = records
            .range::<str, _>((lower, Bound::Unbounded))
            .take(limit.saturating_add(1))
            .map(|(k, _)| k.clone())
            .collect();
        Ok(KeyPage::from_probe(probe, limit))
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        self.records
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if self.faults.read().set {
            return Err(StoreError::io("write failed", "injected failure"));
        }
        self.records.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        {
            let mut faults = self.faults.write();
            if let Some(remaining) = faults.deletes_before_failure.as_mut() {
                if *remaining == 0 {
                    return Err(StoreError::io("delete failed", "injected failure"));
                }
                *remaining -= 1;
            }
        }
        self.records.write().remove(key);
        Ok(())
    }
}
