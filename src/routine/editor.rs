//! Persistent routine editor
//!
//! Binds a [`Routine`] to a [`KeyValueStore`]. The list for the active period
//! is loaded on construction (falling back to the default list) and written
//! back after every successful mutation.

use chrono::Utc;

use super::list::{Progress, Routine, RoutineResult};
use super::{default_steps, Period, RoutineStep};
use crate::storage::KeyValueStore;

/// Routine checklist bound to storage
#[derive(Debug, Clone)]
pub struct RoutineEditor<S> {
    storage: S,
    routine: Routine,
}

impl<S: KeyValueStore> RoutineEditor<S> {
    /// Load the list for `period`
    pub fn load(storage: S, period: Period) -> Self {
        let routine = Self::read(&storage, period);
        Self { storage, routine }
    }

    fn read(storage: &S, period: Period) -> Routine {
        let steps = storage.get_json_or(period.storage_key(), || default_steps(period));
        tracing::debug!(period = %period, steps = steps.len(), "Loaded routine");
        Routine::new(period, steps)
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn period(&self) -> Period {
        self.routine.period()
    }

    pub fn steps(&self) -> &[RoutineStep] {
        self.routine.steps()
    }

    pub fn progress(&self) -> Progress {
        self.routine.progress()
    }

    /// Show the other period's list; no-op if already on `period`
    pub fn switch_period(&mut self, period: Period) {
        if self.routine.period() != period {
            self.routine = Self::read(&self.storage, period);
        }
    }

    /// Flip a step's completed flag
    pub fn toggle_step(&mut self, id: &str) -> RoutineResult<bool> {
        self.commit(|routine| routine.toggle(id))
    }

    /// Append a step with an id derived from the current time
    pub fn add_step(&mut self, name: &str, duration: &str) -> RoutineResult<RoutineStep> {
        self.add_step_at(name, duration, Utc::now().timestamp_millis())
    }

    /// Append a step with an id derived from `now_ms`
    pub fn add_step_at(
        &mut self,
        name: &str,
        duration: &str,
        now_ms: i64,
    ) -> RoutineResult<RoutineStep> {
        let step = self.commit(|routine| routine.add(name, duration, now_ms).cloned())?;
        tracing::debug!(id = %step.id, name = %step.name, "Added routine step");
        Ok(step)
    }

    /// Remove a step
    pub fn delete_step(&mut self, id: &str) -> RoutineResult<RoutineStep> {
        let step = self.commit(|routine| routine.delete(id))?;
        tracing::debug!(id = %step.id, "Deleted routine step");
        Ok(step)
    }

    /// Overwrite the list with the period default
    pub fn reset_routine(&mut self) -> RoutineResult<()> {
        self.commit(|routine| {
            routine.reset();
            Ok(())
        })?;
        tracing::debug!(period = %self.period(), "Reset routine to default");
        Ok(())
    }

    /// Apply `change` to a copy of the list and keep it only once it is stored
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut Routine) -> RoutineResult<T>,
    ) -> RoutineResult<T> {
        let mut next = self.routine.clone();
        let outcome = change(&mut next)?;
        self.storage.set_json(next.period().storage_key(), next.steps())?;
        self.routine = next;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::RoutineError;
    use crate::storage::testing::FlakyStore;
    use crate::storage::{MemoryStore, StorageError, AM_ROUTINE_KEY, PM_ROUTINE_KEY};

    fn stored_steps<S: KeyValueStore>(storage: &S, key: &str) -> Vec<RoutineStep> {
        storage.get_json(key).unwrap().unwrap()
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let editor = RoutineEditor::load(MemoryStore::new(), Period::Am);
        assert_eq!(editor.steps(), default_steps(Period::Am).as_slice());
    }

    #[test]
    fn test_load_falls_back_on_corrupt_list() {
        let storage = MemoryStore::new();
        storage.set(PM_ROUTINE_KEY, "[{\"id\":").unwrap();

        let editor = RoutineEditor::load(storage, Period::Pm);
        assert_eq!(editor.steps(), default_steps(Period::Pm).as_slice());
    }

    #[test]
    fn test_stored_empty_list_is_respected() {
        let storage = MemoryStore::new();
        storage.set(AM_ROUTINE_KEY, "[]").unwrap();

        let editor = RoutineEditor::load(storage, Period::Am);
        assert!(editor.steps().is_empty());
        assert_eq!(editor.progress().percent(), 0.0);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = MemoryStore::new();
        let mut editor = RoutineEditor::load(storage.clone(), Period::Am);

        editor.toggle_step("am1").unwrap();
        assert!(stored_steps(&storage, AM_ROUTINE_KEY)[0].completed);

        editor.add_step_at("Apply Mist", "1 min", 42).unwrap();
        let stored = stored_steps(&storage, AM_ROUTINE_KEY);
        assert_eq!(stored.len(), 6);
        assert_eq!(stored[5].id, "am-42");

        editor.delete_step("am2").unwrap();
        assert_eq!(stored_steps(&storage, AM_ROUTINE_KEY).len(), 5);

        editor.reset_routine().unwrap();
        assert_eq!(
            stored_steps(&storage, AM_ROUTINE_KEY),
            default_steps(Period::Am)
        );

        // The other period is untouched
        assert!(storage.get(PM_ROUTINE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_rejected_add_writes_nothing() {
        let storage = MemoryStore::new();
        let mut editor = RoutineEditor::load(storage.clone(), Period::Pm);

        assert!(editor.add_step("", "1 min").is_err());
        assert!(storage.get(PM_ROUTINE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_failed_write_leaves_list_unchanged() {
        let storage = FlakyStore::new();
        let mut editor = RoutineEditor::load(storage.clone(), Period::Am);
        storage.reject_writes(true);

        assert!(matches!(
            editor.toggle_step("am1"),
            Err(RoutineError::Storage(StorageError::Unavailable(_)))
        ));
        assert!(!editor.routine().get("am1").unwrap().completed);

        assert!(editor.add_step_at("Apply Mist", "1 min", 42).is_err());
        assert_eq!(editor.steps().len(), 5);

        assert!(editor.delete_step("am2").is_err());
        assert!(editor.routine().get("am2").is_some());

        // Memory still matches what a reload sees
        let reloaded = RoutineEditor::load(storage.clone(), Period::Am);
        assert_eq!(editor.steps(), reloaded.steps());

        storage.reject_writes(false);
        assert!(editor.toggle_step("am1").unwrap());
        assert!(stored_steps(&storage, AM_ROUTINE_KEY)[0].completed);
    }

    #[test]
    fn test_edits_survive_reload() {
        let storage = MemoryStore::new();
        {
            let mut editor = RoutineEditor::load(storage.clone(), Period::Pm);
            editor.toggle_step("pm6").unwrap();
            editor.add_step("Face Oil", "1 min").unwrap();
        }

        let editor = RoutineEditor::load(storage, Period::Pm);
        assert_eq!(editor.steps().len(), 7);
        assert!(editor.routine().get("pm6").unwrap().completed);
        assert_eq!(editor.steps()[6].name, "Face Oil");
    }

    #[test]
    fn test_switch_period_loads_other_list() {
        let storage = MemoryStore::new();
        let mut editor = RoutineEditor::load(storage.clone(), Period::Am);
        editor.toggle_step("am3").unwrap();

        editor.switch_period(Period::Pm);
        assert_eq!(editor.period(), Period::Pm);
        assert_eq!(editor.steps().len(), 6);

        editor.switch_period(Period::Am);
        assert!(editor.routine().get("am3").unwrap().completed);
    }
}
