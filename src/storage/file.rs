//! File-backed key-value store with JSON persistence
//!
//! All entries live in one JSON document under the data directory. The
//! document is loaded on open and rewritten on every mutation, so state
//! survives process restarts the way browser local storage survives reloads.
//!
//! A document that cannot be read (bad JSON, unknown version) is moved aside
//! to `storage.json.corrupt` and the store starts empty, the way the web app
//! falls back to defaults for unreadable values.
//!
//! # Layout
//! ```text
//! <data_dir>/
//! ├── storage.json            {"version": 1, "entries": {"amRoutine": "[...]", ...}}
//! └── storage.json.corrupt    last unreadable document, if any
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::error::{StorageError, StorageResult};
use super::kv::KeyValueStore;

const FORMAT_VERSION: u32 = 1;
const FILE_NAME: &str = "storage.json";
const CORRUPT_FILE_NAME: &str = "storage.json.corrupt";

/// Serialization format for JSON persistence
#[derive(Serialize, Deserialize)]
struct StoreData {
    /// Version for future compatibility
    version: u32,
    /// key → raw value
    entries: BTreeMap<String, String>,
}

#[derive(Debug)]
struct Inner {
    entries: BTreeMap<String, String>,
    path: PathBuf,
}

/// JSON-file [`KeyValueStore`] for native builds
///
/// Clones share the same in-memory view and file.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<Mutex<Inner>>,
}

impl FileStore {
    /// Open (or create) the store in `data_dir`
    pub fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;

        let path = data_dir.join(FILE_NAME);
        let entries = if path.exists() {
            match Self::load_from_file(&path) {
                Ok(entries) => entries,
                Err(StorageError::Corruption(reason)) => {
                    let moved_to = data_dir.join(CORRUPT_FILE_NAME);
                    std::fs::rename(&path, &moved_to)?;
                    tracing::warn!(
                        reason = %reason,
                        moved_to = ?moved_to,
                        "Storage file unreadable, starting empty"
                    );
                    BTreeMap::new()
                }
                Err(e) => return Err(e),
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = ?path, keys = entries.len(), "Opened file store");

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner { entries, path })),
        })
    }

    /// Load entries from the JSON file
    fn load_from_file(path: &Path) -> StorageResult<BTreeMap<String, String>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let data: StoreData = serde_json::from_reader(reader).map_err(|e| {
            StorageError::Corruption(format!("Failed to load {}: {}", path.display(), e))
        })?;

        if data.version != FORMAT_VERSION {
            return Err(StorageError::Corruption(format!(
                "Unsupported storage version {} in {}",
                data.version,
                path.display()
            )));
        }

        Ok(data.entries)
    }

    /// Path of the backing JSON document
    pub fn path(&self) -> PathBuf {
        self.inner
            .lock()
            .map(|inner| inner.path.clone())
            .unwrap_or_default()
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let inner = self.lock()?;
        Ok(inner.entries.keys().cloned().collect())
    }

    fn lock(&self) -> StorageResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))
    }
}

impl Inner {
    /// Write `entries` to disk and adopt them once the write succeeded
    fn commit(&mut self, entries: BTreeMap<String, String>) -> StorageResult<()> {
        self.persist(&entries)?;
        self.entries = entries;
        Ok(())
    }

    /// Write the document to a sibling temp file, then rename it into place
    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let data = StoreData {
            version: FORMAT_VERSION,
            entries: entries.clone(),
        };

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &data)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let inner = self.lock()?;
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut inner = self.lock()?;
        let mut entries = inner.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        inner.commit(entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut inner = self.lock()?;
        if !inner.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = inner.entries.clone();
        entries.remove(key);
        inner.commit(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_creation() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert!(store.keys().unwrap().is_empty());
        assert!(store.get("user").unwrap().is_none());
        // Nothing is written until the first mutation
        assert!(!store.path().exists());
    }

    #[test]
    fn test_persistence() {
        let dir = tempdir().unwrap();

        // Create and populate
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("theme", "dark").unwrap();
            store.set("amRoutine", "[]").unwrap();
        }

        // Reopen and verify
        {
            let store = FileStore::open(dir.path()).unwrap();
            assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
            assert_eq!(store.get("amRoutine").unwrap().as_deref(), Some("[]"));
            assert_eq!(store.keys().unwrap(), vec!["amRoutine", "theme"]);
        }
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            store.set("user", "{\"id\":\"1\"}").unwrap();
            store.remove("user").unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("user").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_moved_aside() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(FILE_NAME), "{ definitely not json").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.keys().unwrap().is_empty());
        assert!(!store.path().exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join(CORRUPT_FILE_NAME)).unwrap(),
            "{ definitely not json"
        );

        // The store is usable again
        store.set("theme", "dark").unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_unknown_version_is_moved_aside() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(FILE_NAME),
            r#"{"version": 99, "entries": {"theme": "dark"}}"#,
        )
        .unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get("theme").unwrap().is_none());
        assert!(dir.path().join(CORRUPT_FILE_NAME).exists());
    }

    #[test]
    fn test_unreadable_load_is_reported_as_corruption() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "[]").unwrap();

        let result = FileStore::load_from_file(&path);
        assert!(matches!(result, Err(StorageError::Corruption(_))));
    }

    #[test]
    fn test_failed_write_keeps_previous_entries() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("theme", "light").unwrap();

        // A directory in the temp file's place makes the next write fail
        std::fs::create_dir(dir.path().join("storage.json.tmp")).unwrap();

        assert!(store.set("theme", "dark").is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert!(store.remove("theme").is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("theme", "light").unwrap();

        assert!(store.path().exists());
        assert!(!dir.path().join("storage.json.tmp").exists());
    }
}
