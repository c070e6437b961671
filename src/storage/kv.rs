use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DbError, DbResult};

/// Ordered set of writes applied all together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    /// `Some` stores the value, `None` removes the key
    ops: Vec<(String, Option<String>)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.ops.push((key.to_string(), Some(value.to_string())));
    }

    pub fn remove(&mut self, key: &str) {
        self.ops.push((key.to_string(), None));
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies the writes to `entries`. Returns whether anything changed.
    fn apply_to<M: Entries>(self, entries: &mut M) -> bool {
        let mut changed = false;
        for (key, value) in self.ops {
            changed |= match value {
                Some(value) => entries.put(key, value),
                None => entries.delete(&key),
            };
        }
        changed
    }
}

/// Map operations a batch needs, shared by both stores.
trait Entries {
    fn put(&mut self, key: String, value: String) -> bool;
    fn delete(&mut self, key: &str) -> bool;
}

impl Entries for HashMap<String, String> {
    fn put(&mut self, key: String, value: String) -> bool {
        self.insert(key, value.clone()).as_ref() != Some(&value)
    }

    fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }
}

impl Entries for BTreeMap<String, String> {
    fn put(&mut self, key: String, value: String) -> bool {
        self.insert(key, value.clone()).as_ref() != Some(&value)
    }

    fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }
}

/// String key-value storage the catalog snapshot is written to.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Applies every write in `batch`, or none of them on error.
    fn apply(&mut self, batch: WriteBatch) -> DbResult<()>;

    /// Stores `value` under `key`, replacing what was there.
    fn set(&mut self, key: &str, value: &str) -> DbResult<()> {
        let mut batch = WriteBatch::new();
        batch.set(key, value);
        self.apply(batch)
    }

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> DbResult<()> {
        let mut batch = WriteBatch::new();
        batch.remove(key);
        self.apply(batch)
    }
}

/// In-memory store, for tests and `--memory` sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, batch: WriteBatch) -> DbResult<()> {
        batch.apply_to(&mut self.entries);
        Ok(())
    }
}

/// Store kept as a single JSON object file.
///
/// The whole file is rewritten on every change: written to a temp file,
/// synced, then renamed over the old one. The in-memory entries only take
/// on a batch once that rename succeeded.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// File name used inside a data directory
    pub const FILE_NAME: &'static str = "store.json";

    /// Opens (or starts) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Opens `<dir>/store.json`, creating `dir` if needed.
    pub fn in_dir(dir: &Path) -> DbResult<Self> {
        std::fs::create_dir_all(dir)?;
        Self::open(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, entries: &BTreeMap<String, String>) -> DbResult<()> {
        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(entries)?;

        let mut temp_file = File::create(&temp_path).map_err(|e| {
            DbError::Storage(format!("Failed to create {}: {}", temp_path.display(), e))
        })?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.sync_all()?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            DbError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, batch: WriteBatch) -> DbResult<()> {
        let mut next = self.entries.clone();
        if !batch.apply_to(&mut next) {
            return Ok(());
        }

        self.write_file(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempdir().unwrap();

        let mut store = FileStore::in_dir(dir.path()).unwrap();
        store.set("catalog", "{\"databases\":[]}").unwrap();
        store.set("selected_database", "shop").unwrap();
        store.remove("selected_database").unwrap();

        let reopened = FileStore::in_dir(dir.path()).unwrap();
        assert_eq!(
            reopened.get("catalog").unwrap(),
            Some("{\"databases\":[]}".to_string())
        );
        assert_eq!(reopened.get("selected_database").unwrap(), None);
        assert!(!dir.path().join("store.json.tmp").exists());
    }

    #[test]
    fn test_batch_applies_in_order() {
        let mut store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.set("a", "1");
        batch.set("b", "2");
        batch.remove("a");
        assert!(!batch.is_empty());

        store.apply(batch).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_failed_write_keeps_entries_and_file() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path()).unwrap();
        store.set("catalog", "old").unwrap();
        let on_disk = std::fs::read_to_string(store.path()).unwrap();

        // A directory where the temp file goes makes the write fail
        std::fs::create_dir(dir.path().join("store.json.tmp")).unwrap();

        let mut batch = WriteBatch::new();
        batch.set("catalog", "new");
        batch.set("selected_database", "shop");
        let err = store.apply(batch).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Storage);

        assert_eq!(store.get("catalog").unwrap(), Some("old".to_string()));
        assert_eq!(store.get("selected_database").unwrap(), None);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), on_disk);
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Storage);
    }
}
