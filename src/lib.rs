//! # Skin Glow
//!
//! Personal skincare routine tracker. Keeps morning and evening routine
//! checklists, a list of active ingredients, a (mock) camera skin analysis and
//! a progress dashboard, all persisted to local key-value storage.
//!
//! ## Modules
//!
//! - [`storage`]: Key-value storage port with memory and file backends
//! - [`session`]: Simulated sign-in state
//! - [`appearance`]: Dark mode and background palette
//! - [`routine`]: AM/PM routine checklists
//! - [`actives`]: Active ingredient list
//! - [`analysis`]: Camera capture session and skin analyzer
//! - [`progress`]: Progress dashboard sample data
//! - [`clock`]: Wall clock and AM/PM period tracking
//! - [`report`]: Downloadable JSON report
//!
//! The library builds for `wasm32-unknown-unknown`; `config` and the file
//! store are native only.
//!
//! ## Quick Start
//!
//! ```rust
//! use skin_glow::routine::{Period, RoutineEditor};
//! use skin_glow::storage::MemoryStore;
//!
//! let mut editor = RoutineEditor::load(MemoryStore::new(), Period::Am);
//! editor.toggle_step("am1").unwrap();
//! editor.add_step("Apply Mist", "1 min").unwrap();
//!
//! assert_eq!(editor.progress().completed, 1);
//! assert_eq!(editor.steps().len(), 6);
//! ```

pub mod actives;
pub mod analysis;
pub mod appearance;
pub mod clock;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod progress;
pub mod report;
pub mod routine;
pub mod session;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;

pub use session::{SessionError, SessionResult, SessionStore, User};

pub use appearance::{AppearanceStore, Palette, ProfileSettings};

pub use routine::{Period, Progress, Routine, RoutineEditor, RoutineError, RoutineStep};

pub use actives::{Active, ActivesError, ActivesList};

pub use analysis::{
    AnalysisResult, Camera, CameraError, CameraStream, CaptureSession, CaptureState,
    CapturedFrame, MockAnalyzer, SkinAnalyzer,
};

pub use clock::{ClockReading, PeriodTracker};

pub use report::Report;

#[cfg(not(target_arch = "wasm32"))]
pub use config::{Config, ConfigError, LoggingConfig};
