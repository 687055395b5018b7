//! Key-value storage port
//!
//! Every persisted slice of application state goes through [`KeyValueStore`].
//! Values are strings; structured values are JSON-encoded with the helpers
//! below. Implementations are cheap handles (`Clone`) so each state container
//! can own one.

use serde::{de::DeserializeOwned, Serialize};

use super::error::StorageResult;

/// Storage key for the logged-in user record
pub const USER_KEY: &str = "user";
/// Storage key for the `"dark"` / `"light"` theme flag (stored raw, not JSON)
pub const THEME_KEY: &str = "theme";
/// Storage key for the profile settings blob
pub const PROFILE_SETTINGS_KEY: &str = "profileSettings";
/// Storage key for the morning routine list
pub const AM_ROUTINE_KEY: &str = "amRoutine";
/// Storage key for the evening routine list
pub const PM_ROUTINE_KEY: &str = "pmRoutine";

/// A string key-value store
///
/// Mirrors the browser `localStorage` contract: absent keys read as `None`,
/// `set` overwrites, `remove` on an absent key is not an error.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Read and decode a JSON value
    ///
    /// Returns `Ok(None)` when the key is absent and a serialization error when
    /// the stored text is not valid JSON for `T`.
    fn get_json<T>(&self, key: &str) -> StorageResult<Option<T>>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON and write it
    fn set_json<T>(&self, key: &str, value: &T) -> StorageResult<()>
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    /// Read a JSON value, falling back to `default` when it is absent or unreadable
    ///
    /// Decode and backend failures are logged and swallowed.
    fn get_json_or<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
        Self: Sized,
    {
        match self.get_json(key) {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    "Failed to load stored value, using default"
                );
                default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        label: String,
        count: u32,
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        let sample = Sample {
            label: "spf".to_string(),
            count: 50,
        };

        store.set_json("sample", &sample).unwrap();
        let loaded: Option<Sample> = store.get_json("sample").unwrap();
        assert_eq!(loaded, Some(sample));

        let missing: Option<Sample> = store.get_json("missing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_get_json_or_falls_back_on_garbage() {
        let store = MemoryStore::new();
        store.set("sample", "{not json").unwrap();

        let loaded = store.get_json_or("sample", || Sample {
            label: "fallback".to_string(),
            count: 0,
        });
        assert_eq!(loaded.label, "fallback");
    }

    #[test]
    fn test_get_json_strict_reports_garbage() {
        let store = MemoryStore::new();
        store.set("sample", "[1, 2").unwrap();

        let result: StorageResult<Option<Sample>> = store.get_json("sample");
        assert!(result.is_err());
    }
}
