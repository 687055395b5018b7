//! Skin analyzer port and the built-in mock

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::camera::CapturedFrame;

/// How long the mock pretends to think
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

/// Outcome of analyzing a captured frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub skin_tone: String,
    pub hydration_level: String,
    pub oiliness: String,
    pub sensitivity: String,
    pub texture: String,
    pub concerns: Vec<String>,
}

/// Turns a captured frame into an [`AnalysisResult`]
pub trait SkinAnalyzer {
    fn analyze(&self, frame: &CapturedFrame) -> AnalysisResult;

    /// Time callers should wait before asking for the result
    fn latency(&self) -> Duration;
}

/// Analyzer that ignores the image and returns a fixed result
#[derive(Debug, Clone, Copy)]
pub struct MockAnalyzer {
    latency: Duration,
}

impl MockAnalyzer {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// The fixed result every analysis yields
    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            skin_tone: "Medium".to_string(),
            hydration_level: "Good (75%)".to_string(),
            oiliness: "Balanced".to_string(),
            sensitivity: "Moderate".to_string(),
            texture: "Smooth with minor pores".to_string(),
            concerns: vec![
                "Fine lines".to_string(),
                "Slight redness".to_string(),
                "Mild texture".to_string(),
            ],
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_DELAY)
    }
}

impl SkinAnalyzer for MockAnalyzer {
    fn analyze(&self, _frame: &CapturedFrame) -> AnalysisResult {
        Self::sample_result()
    }

    fn latency(&self) -> Duration {
        self.latency
    }
}
