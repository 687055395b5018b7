//! Routine list and its state transitions
//!
//! Everything here is pure: no storage, no clock. Callers pass the current
//! time in when an id has to be generated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{default_steps, Period, RoutineStep, DEFAULT_STEP_DURATION};
use crate::storage::StorageError;

/// Routine errors
#[derive(Error, Debug)]
pub enum RoutineError {
    /// New step has no name
    #[error("Step name must not be blank")]
    BlankName,

    /// No step with this id in the current list
    #[error("Step not found: {0}")]
    StepNotFound(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for routine operations
pub type RoutineResult<T> = Result<T, RoutineError>;

/// Completion summary of a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in percent; 0 for an empty list
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }

    /// CSS width for a progress bar
    pub fn width(&self) -> String {
        format!("{}%", self.percent())
    }

    /// Non-empty and every step done
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// An ordered checklist for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    period: Period,
    steps: Vec<RoutineStep>,
}

impl Routine {
    pub fn new(period: Period, steps: Vec<RoutineStep>) -> Self {
        Self { period, steps }
    }

    /// The built-in list for `period`
    pub fn default_for(period: Period) -> Self {
        Self::new(period, default_steps(period))
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn steps(&self) -> &[RoutineStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RoutineStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.steps.iter().filter(|s| s.completed).count(),
            total: self.steps.len(),
        }
    }

    /// Flip the completed flag of the step with `id`
    ///
    /// Returns the new flag.
    pub fn toggle(&mut self, id: &str) -> RoutineResult<bool> {
        let step = self
            .steps
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RoutineError::StepNotFound(id.to_string()))?;
        step.completed = !step.completed;
        Ok(step.completed)
    }

    /// Append a new uncompleted step
    ///
    /// The id is `<prefix>-<now_ms>`, bumped forward until it is unused in
    /// this list. A blank duration falls back to [`DEFAULT_STEP_DURATION`].
    pub fn add(&mut self, name: &str, duration: &str, now_ms: i64) -> RoutineResult<&RoutineStep> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RoutineError::BlankName);
        }

        let duration = match duration.trim() {
            "" => DEFAULT_STEP_DURATION,
            d => d,
        };

        let id = self.next_id(now_ms);
        self.steps.push(RoutineStep::new(id, name, duration));
        Ok(&self.steps[self.steps.len() - 1])
    }

    /// Remove the step with `id`
    pub fn delete(&mut self, id: &str) -> RoutineResult<RoutineStep> {
        let index = self
            .steps
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RoutineError::StepNotFound(id.to_string()))?;
        Ok(self.steps.remove(index))
    }

    /// Replace the list with the period default
    pub fn reset(&mut self) {
        self.steps = default_steps(self.period);
    }

    fn next_id(&self, now_ms: i64) -> String {
        let prefix = self.period.id_prefix();
        let mut stamp = now_ms;
        loop {
            let id = format!("{}-{}", prefix, stamp);
            if self.get(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut routine = Routine::default_for(Period::Am);
        let before = routine.clone();

        assert!(routine.toggle("am2").unwrap());
        assert!(routine.get("am2").unwrap().completed);
        assert!(!routine.get("am1").unwrap().completed);

        assert!(!routine.toggle("am2").unwrap());
        assert_eq!(routine, before);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut routine = Routine::default_for(Period::Pm);
        let before = routine.clone();

        assert!(matches!(
            routine.toggle("nope"),
            Err(RoutineError::StepNotFound(_))
        ));
        assert_eq!(routine, before);
    }

    #[test]
    fn test_add_step_scenario() {
        let mut routine = Routine::default_for(Period::Am);
        assert_eq!(routine.len(), 5);

        routine.add("Apply Mist", "1 min", NOW).unwrap();

        assert_eq!(routine.len(), 6);
        let last = routine.steps().last().unwrap();
        assert_eq!(last.name, "Apply Mist");
        assert_eq!(last.duration, "1 min");
        assert_eq!(last.id, format!("am-{}", NOW));
        assert!(!last.completed);
    }

    #[test]
    fn test_add_blank_name_is_rejected() {
        let mut routine = Routine::default_for(Period::Am);

        assert!(matches!(
            routine.add("   ", "2 min", NOW),
            Err(RoutineError::BlankName)
        ));
        assert_eq!(routine.len(), 5);
    }

    #[test]
    fn test_add_blank_duration_uses_default() {
        let mut routine = Routine::new(Period::Pm, Vec::new());
        let step = routine.add("Lip Balm", "", NOW).unwrap();
        assert_eq!(step.duration, DEFAULT_STEP_DURATION);
        assert!(step.id.starts_with("pm-"));
    }

    #[test]
    fn test_add_in_same_millisecond_keeps_ids_unique() {
        let mut routine = Routine::new(Period::Am, Vec::new());
        routine.add("One", "1 min", NOW).unwrap();
        routine.add("Two", "1 min", NOW).unwrap();
        routine.add("Three", "1 min", NOW).unwrap();

        let ids: Vec<_> = routine.steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                format!("am-{}", NOW),
                format!("am-{}", NOW + 1),
                format!("am-{}", NOW + 2)
            ]
        );
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut routine = Routine::default_for(Period::Pm);
        let removed = routine.delete("pm3").unwrap();

        assert_eq!(removed.name, "Apply Toner");
        assert_eq!(routine.len(), 5);
        assert!(routine.get("pm3").is_none());
        assert!(routine.get("pm2").is_some());
        assert!(routine.get("pm4").is_some());

        assert!(routine.delete("pm3").is_err());
        assert_eq!(routine.len(), 5);
    }

    #[test]
    fn test_progress() {
        let empty = Routine::new(Period::Am, Vec::new());
        assert_eq!(empty.progress().percent(), 0.0);
        assert!(!empty.progress().is_complete());

        let mut routine = Routine::default_for(Period::Am);
        routine.toggle("am1").unwrap();
        routine.toggle("am2").unwrap();
        assert_eq!(routine.progress(), Progress { completed: 2, total: 5 });
        assert_eq!(routine.progress().percent(), 40.0);
        assert_eq!(routine.progress().width(), "40%");

        for id in ["am3", "am4", "am5"] {
            routine.toggle(id).unwrap();
        }
        assert_eq!(routine.progress().percent(), 100.0);
        assert!(routine.progress().is_complete());
    }

    #[test]
    fn test_reset_discards_edits() {
        let mut routine = Routine::default_for(Period::Pm);
        routine.toggle("pm1").unwrap();
        routine.delete("pm6").unwrap();
        routine.add("Face Mask", "10 min", NOW).unwrap();

        routine.reset();

        assert_eq!(routine, Routine::default_for(Period::Pm));
    }
}
