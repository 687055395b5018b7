//! Camera port and capture session

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::analyzer::{AnalysisResult, SkinAnalyzer};

/// Message shown to the user when the camera cannot be opened
pub const CAMERA_ALERT: &str = "Could not access camera. Please check permissions.";

/// Camera errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Device missing or permission denied
    #[error("Camera unavailable: {0}")]
    Unavailable(String),

    /// Grabbing a frame from a live stream failed
    #[error("Capture failed: {0}")]
    Capture(String),

    /// The stream has already been stopped
    #[error("Camera stream stopped")]
    Stopped,

    /// Operation not allowed in the current session state
    #[error("Invalid capture state: {0}")]
    InvalidState(&'static str),
}

/// Result type alias for camera operations
pub type CameraResult<T> = Result<T, CameraError>;

/// Encoded still image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameImage {
    /// `data:image/jpeg;base64,...` as produced by a canvas
    DataUrl(String),
    /// Raw file contents
    Bytes(Vec<u8>),
}

/// A still frame taken from a camera stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub image: FrameImage,
    pub captured_at: DateTime<Utc>,
}

impl CapturedFrame {
    pub fn new(image: FrameImage) -> Self {
        Self {
            image,
            captured_at: Utc::now(),
        }
    }
}

/// Source of camera streams
#[async_trait(?Send)]
pub trait Camera {
    type Stream: CameraStream;

    /// Acquire a live stream
    async fn open(&self) -> CameraResult<Self::Stream>;
}

/// A live camera stream
///
/// `stop` must be idempotent; the session calls it on every exit path.
pub trait CameraStream {
    fn capture(&mut self) -> CameraResult<CapturedFrame>;

    fn stop(&mut self);
}

/// Where a capture session currently is
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    Idle,
    Streaming,
    Analyzing {
        frame: CapturedFrame,
        capture_id: u64,
    },
    Complete {
        frame: CapturedFrame,
        result: AnalysisResult,
    },
}

/// Camera capture state machine
///
/// Owns the live stream while streaming and releases it on capture, cancel,
/// reset and drop.
pub struct CaptureSession<St: CameraStream> {
    state: CaptureState,
    stream: Option<St>,
    next_capture_id: u64,
}

impl<St: CameraStream> Default for CaptureSession<St> {
    fn default() -> Self {
        Self::new()
    }
}

impl<St: CameraStream> CaptureSession<St> {
    pub fn new() -> Self {
        Self {
            state: CaptureState::Idle,
            stream: None,
            next_capture_id: 0,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, CaptureState::Idle)
    }

    pub fn is_streaming(&self) -> bool {
        matches!(self.state, CaptureState::Streaming)
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, CaptureState::Analyzing { .. })
    }

    /// Live stream, while streaming
    pub fn stream(&self) -> Option<&St> {
        self.stream.as_ref()
    }

    /// The captured frame, once taken
    pub fn frame(&self) -> Option<&CapturedFrame> {
        match &self.state {
            CaptureState::Analyzing { frame, .. } | CaptureState::Complete { frame, .. } => {
                Some(frame)
            }
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            CaptureState::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Open `camera` and start streaming
    ///
    /// On failure the session stays idle and the error is returned for the
    /// caller to surface.
    pub async fn start<C>(&mut self, camera: &C) -> CameraResult<()>
    where
        C: Camera<Stream = St> + ?Sized,
    {
        if !self.is_idle() {
            return Err(CameraError::InvalidState("camera already started"));
        }
        match camera.open().await {
            Ok(stream) => self.attach(stream),
            Err(e) => {
                tracing::warn!(error = %e, "Error accessing camera");
                Err(e)
            }
        }
    }

    /// Start streaming from an already opened stream
    ///
    /// Outside the idle state the stream is stopped and rejected.
    pub fn attach(&mut self, mut stream: St) -> CameraResult<()> {
        if !self.is_idle() {
            stream.stop();
            return Err(CameraError::InvalidState("camera already started"));
        }
        self.stream = Some(stream);
        self.state = CaptureState::Streaming;
        tracing::debug!("Camera streaming");
        Ok(())
    }

    /// Take a still, release the stream and begin analysis
    ///
    /// Returns the capture id to pass to [`finish_analysis`](Self::finish_analysis).
    pub fn capture(&mut self) -> CameraResult<u64> {
        let stream = match (&self.state, self.stream.as_mut()) {
            (CaptureState::Streaming, Some(stream)) => stream,
            _ => return Err(CameraError::InvalidState("capture requires a live stream")),
        };
        let frame = stream.capture()?;
        self.release();

        self.next_capture_id += 1;
        let capture_id = self.next_capture_id;
        self.state = CaptureState::Analyzing { frame, capture_id };
        tracing::debug!(capture_id, "Captured frame");
        Ok(capture_id)
    }

    /// Stop streaming without capturing; returns whether anything changed
    pub fn cancel(&mut self) -> bool {
        if !self.is_streaming() {
            return false;
        }
        self.release();
        self.state = CaptureState::Idle;
        tracing::debug!("Camera cancelled");
        true
    }

    /// Complete the analysis for `capture_id`
    ///
    /// Ignored (returns `false`) when that capture is no longer the one being
    /// analyzed, e.g. after a reset.
    pub fn finish_analysis<A>(&mut self, capture_id: u64, analyzer: &A) -> bool
    where
        A: SkinAnalyzer + ?Sized,
    {
        let frame = match &self.state {
            CaptureState::Analyzing {
                frame,
                capture_id: current,
            } if *current == capture_id => frame.clone(),
            _ => {
                tracing::debug!(capture_id, "Dropping stale analysis");
                return false;
            }
        };

        let result = analyzer.analyze(&frame);
        self.state = CaptureState::Complete { frame, result };
        true
    }

    /// Discard any capture and return to idle
    pub fn reset(&mut self) {
        self.release();
        self.state = CaptureState::Idle;
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}

impl<St: CameraStream> Drop for CaptureSession<St> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::*;
    use std::path::PathBuf;

    /// Camera that serves an image file as its only frame
    #[derive(Debug, Clone)]
    pub struct FileCamera {
        path: PathBuf,
    }

    impl FileCamera {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    #[async_trait(?Send)]
    impl Camera for FileCamera {
        type Stream = FileStream;

        async fn open(&self) -> CameraResult<FileStream> {
            let bytes = tokio::fs::read(&self.path)
                .await
                .map_err(|e| CameraError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
            tracing::debug!(
                path = %self.path.display(),
                bytes = bytes.len(),
                "Opened image source"
            );
            Ok(FileStream { bytes: Some(bytes) })
        }
    }

    #[derive(Debug)]
    pub struct FileStream {
        bytes: Option<Vec<u8>>,
    }

    impl FileStream {
        pub fn is_live(&self) -> bool {
            self.bytes.is_some()
        }
    }

    impl CameraStream for FileStream {
        fn capture(&mut self) -> CameraResult<CapturedFrame> {
            let bytes = self.bytes.clone().ok_or(CameraError::Stopped)?;
            Ok(CapturedFrame::new(FrameImage::Bytes(bytes)))
        }

        fn stop(&mut self) {
            self.bytes = None;
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileCamera, FileStream};
