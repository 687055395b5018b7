//! Test backend whose writes can be switched off

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::error::{StorageError, StorageResult};
use super::kv::KeyValueStore;
use super::memory::MemoryStore;

/// [`MemoryStore`] that rejects `set` and `remove` while writes are disabled
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    reject_writes: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.inner.remove(key)
    }
}
