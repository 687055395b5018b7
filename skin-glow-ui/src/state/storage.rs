//! Browser Storage
//!
//! `localStorage` behind the core [`KeyValueStore`] port.

use skin_glow::storage::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

/// `window.localStorage` handle
///
/// Private browsing modes can deny access; every call then fails with
/// [`StorageError::Unavailable`] and the state containers fall back to defaults.
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn new() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            web_sys::console::warn_1(&"localStorage is not available".into());
        }
        Self { inner }
    }

    fn storage(&self) -> StorageResult<&web_sys::Storage> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl Default for BrowserStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", e))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
