//! Skin Glow Storage
//!
//! Local key-value persistence behind a single port:
//!
//! - **kv**: the [`KeyValueStore`] trait, JSON helpers and the well-known keys
//! - **memory**: in-memory store for tests
//! - **file**: JSON-document store for native builds
//! - **error**: Error types
//!
//! The web frontend provides its own `localStorage` implementation of the
//! same trait.
//!
//! # Example
//!
//! ```rust
//! use skin_glow::storage::{KeyValueStore, MemoryStore, THEME_KEY};
//!
//! let store = MemoryStore::new();
//! store.set(THEME_KEY, "dark").unwrap();
//! assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
//! ```

pub mod error;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod kv;
pub mod memory;
#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
pub use kv::{
    KeyValueStore, AM_ROUTINE_KEY, PM_ROUTINE_KEY, PROFILE_SETTINGS_KEY, THEME_KEY, USER_KEY,
};
pub use memory::MemoryStore;
