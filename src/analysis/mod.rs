//! Skin Analysis
//!
//! Camera capture and the (mock) analyzer behind it.
//!
//! - **camera**: the [`Camera`] / [`CameraStream`] ports and the
//!   [`CaptureSession`] state machine
//! - **analyzer**: the [`SkinAnalyzer`] port and [`MockAnalyzer`]
//!
//! ```text
//! Idle ──start──► Streaming ──capture──► Analyzing ──finish──► Complete
//!  ▲                  │                      │                    │
//!  └──────cancel──────┘                      └──────reset─────────┘
//! ```
//!
//! The session never sleeps. Frontends wait [`SkinAnalyzer::latency`] with
//! their own timer and then call [`CaptureSession::finish_analysis`] with the
//! capture id they were handed.

pub mod analyzer;
pub mod camera;

pub use analyzer::{AnalysisResult, MockAnalyzer, SkinAnalyzer, DEFAULT_ANALYSIS_DELAY};
pub use camera::{
    Camera, CameraError, CameraResult, CameraStream, CaptureSession, CaptureState, CapturedFrame,
    FrameImage, CAMERA_ALERT,
};

#[cfg(not(target_arch = "wasm32"))]
pub use camera::{FileCamera, FileStream};
