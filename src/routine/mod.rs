//! Routine Tracking
//!
//! Morning and evening checklists of skincare steps.
//!
//! - **list**: [`Routine`], the pure step list and its transitions
//! - **editor**: [`RoutineEditor`], a routine bound to storage that persists
//!   after every change
//!
//! ```text
//! toggle / add / delete / reset
//!        │
//!        ▼
//!   Routine (pure) ──► RoutineEditor::commit ──► "amRoutine" | "pmRoutine"
//! ```

pub mod editor;
pub mod list;

pub use editor::RoutineEditor;
pub use list::{Progress, Routine, RoutineError, RoutineResult};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::{AM_ROUTINE_KEY, PM_ROUTINE_KEY};

/// Half of the day a routine belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Am,
    Pm,
}

impl Period {
    /// Period for an hour of the day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            Period::Am
        } else {
            Period::Pm
        }
    }

    pub fn is_am(&self) -> bool {
        matches!(self, Period::Am)
    }

    /// Storage key holding this period's list
    pub fn storage_key(&self) -> &'static str {
        match self {
            Period::Am => AM_ROUTINE_KEY,
            Period::Pm => PM_ROUTINE_KEY,
        }
    }

    /// Prefix for generated step ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Period::Am => "am",
            Period::Pm => "pm",
        }
    }

    /// Heading used by the routine views
    pub fn title(&self) -> &'static str {
        match self {
            Period::Am => "🌅 Morning",
            Period::Pm => "🌙 Evening",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => write!(f, "AM"),
            Period::Pm => write!(f, "PM"),
        }
    }
}

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: String,
    pub name: String,
    /// Free-form label such as "2 min"
    pub duration: String,
    pub completed: bool,
}

impl RoutineStep {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: duration.into(),
            completed: false,
        }
    }
}

/// Duration used when a new step is added without one
pub const DEFAULT_STEP_DURATION: &str = "1 min";

/// The built-in list for a period
pub fn default_steps(period: Period) -> Vec<RoutineStep> {
    let steps: &[(&str, &str, &str)] = match period {
        Period::Am => &[
            ("am1", "Cleanse Face", "2 min"),
            ("am2", "Apply Toner", "1 min"),
            ("am3", "Apply Serums & Actives", "2 min"),
            ("am4", "Moisturizer", "1 min"),
            ("am5", "Sunscreen SPF 50", "2 min"),
        ],
        Period::Pm => &[
            ("pm1", "Remove Makeup", "3 min"),
            ("pm2", "Cleanse Face", "2 min"),
            ("pm3", "Apply Toner", "1 min"),
            ("pm4", "Apply Serums & Actives", "3 min"),
            ("pm5", "Night Moisturizer", "2 min"),
            ("pm6", "Eye Cream", "1 min"),
        ],
    };

    steps
        .iter()
        .map(|(id, name, duration)| RoutineStep::new(*id, *name, *duration))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_hour() {
        assert_eq!(Period::from_hour(0), Period::Am);
        assert_eq!(Period::from_hour(11), Period::Am);
        assert_eq!(Period::from_hour(12), Period::Pm);
        assert_eq!(Period::from_hour(23), Period::Pm);
    }

    #[test]
    fn test_storage_keys() {
        assert_eq!(Period::Am.storage_key(), "amRoutine");
        assert_eq!(Period::Pm.storage_key(), "pmRoutine");
    }

    #[test]
    fn test_default_lists() {
        let am = default_steps(Period::Am);
        assert_eq!(am.len(), 5);
        assert_eq!(am[4].name, "Sunscreen SPF 50");
        assert!(am.iter().all(|s| !s.completed));

        let pm = default_steps(Period::Pm);
        assert_eq!(pm.len(), 6);
        assert_eq!(pm[0].id, "pm1");
        assert_eq!(pm[5].name, "Eye Cream");
    }

    #[test]
    fn test_step_wire_format() {
        let step = RoutineStep::new("am1", "Cleanse Face", "2 min");
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "am1",
                "name": "Cleanse Face",
                "duration": "2 min",
                "completed": false
            })
        );
    }
}
