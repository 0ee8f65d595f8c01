//! Undo/redo functionality

use crate::error::HistoryError;

use super::PlanState;

impl PlanState {
    /// Undo last change
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        let previous = self.history.undo(&self.plan.objects)?;
        self.plan.objects = previous;
        self.touch();
        Ok(())
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        let next = self.history.redo()?;
        self.plan.objects = next;
        self.touch();
        Ok(())
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::HistoryError;
    use crate::fixtures::plan_state;
    use shared::Rotation;

    #[test]
    fn test_undo_redo_add() {
        let mut state = plan_state(10, 10);
        state.add_object("square", 0, 0, 1).unwrap();
        let after = state.objects().to_vec();

        state.undo().unwrap();
        assert!(state.objects().is_empty());
        assert!(state.can_redo());

        state.redo().unwrap();
        assert_eq!(state.objects(), &after[..]);
        assert!(!state.can_redo());
    }

    #[test]
    fn test_undo_at_boundary() {
        let mut state = plan_state(10, 10);
        assert_eq!(state.undo(), Err(HistoryError::NothingToUndo));
        assert_eq!(state.redo(), Err(HistoryError::NothingToRedo));
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_undo_does_not_record() {
        let mut state = plan_state(10, 10);
        state.add_object("square", 0, 0, 1).unwrap();
        state.add_object("square", 2, 0, 1).unwrap();
        state.undo().unwrap();
        state.undo().unwrap();
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_new_mutation_discards_redo_branch() {
        let mut state = plan_state(10, 10);
        state.add_object("square", 0, 0, 1).unwrap();
        state.add_object("square", 2, 0, 1).unwrap();
        state.undo().unwrap();
        assert!(state.can_redo());

        state.add_object("square", 4, 4, 1).unwrap();
        assert!(!state.can_redo());
        assert_eq!(state.redo(), Err(HistoryError::NothingToRedo));
        assert_eq!(state.objects().len(), 2);
        assert!(state.objects().iter().all(|o| o.grid_x != 2));
    }

    #[test]
    fn test_undo_restores_rotation() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("wide", 0, 0, 1).unwrap();
        state.rotate_object(&a.id).unwrap();
        state.undo().unwrap();
        assert_eq!(state.get_object(&a.id).unwrap().rotation, Rotation::Deg0);
        state.redo().unwrap();
        assert_eq!(state.get_object(&a.id).unwrap().rotation, Rotation::Deg90);
    }

    #[test]
    fn test_undo_delete_and_clear() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("square", 0, 0, 1).unwrap();
        state.add_object("square", 2, 0, 1).unwrap();
        state.delete_object(&a.id).unwrap();
        state.clear_all();

        state.undo().unwrap();
        assert_eq!(state.objects().len(), 1);
        state.undo().unwrap();
        assert_eq!(state.objects().len(), 2);
        assert!(state.get_object(&a.id).is_some());
    }
}
