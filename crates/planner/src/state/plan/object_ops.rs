//! Object add/update/rotate/delete operations

use shared::{ObjectChanges, PlacedObject, Rotation};

use crate::error::{EditError, Rejection};

use super::{new_object_id, PlanState};

impl PlanState {
    /// Place a new object with rotation 0.
    ///
    /// Rejected placements leave the plan and its history untouched.
    pub fn add_object(
        &mut self,
        type_id: &str,
        grid_x: i32,
        grid_y: i32,
        level: u32,
    ) -> Result<PlacedObject, EditError> {
        let object = PlacedObject {
            level,
            ..PlacedObject::new(new_object_id(), type_id, grid_x, grid_y)
        };

        self.validate_candidate(&object, None, true, true)?;

        let mut objects = self.plan.objects.clone();
        objects.push(object.clone());
        self.commit(objects);
        Ok(object)
    }

    /// Merge `changes` into an object.
    ///
    /// Position or rotation changes are re-validated against the grid and
    /// every other object; a level change is range-checked. An empty change
    /// returns the object as is and records nothing.
    pub fn update_object(
        &mut self,
        id: &str,
        changes: &ObjectChanges,
    ) -> Result<PlacedObject, EditError> {
        let index = self.index_of(id)?;
        if changes.is_empty() {
            return Ok(self.plan.objects[index].clone());
        }
        let updated = self.plan.objects[index].with_changes(changes);

        self.validate_candidate(
            &updated,
            Some(id),
            changes.level.is_some(),
            changes.is_geometric(),
        )?;

        let mut objects = self.plan.objects.clone();
        objects[index] = updated.clone();
        self.commit(objects);
        Ok(updated)
    }

    /// Move an object so its top-left cell is `(grid_x, grid_y)`
    pub fn move_object(
        &mut self,
        id: &str,
        grid_x: i32,
        grid_y: i32,
    ) -> Result<PlacedObject, EditError> {
        self.update_object(id, &ObjectChanges::position(grid_x, grid_y))
    }

    /// Advance rotation 0 → 90 → 180 → 270 → 0, returning the new rotation
    pub fn rotate_object(&mut self, id: &str) -> Result<Rotation, EditError> {
        let index = self.index_of(id)?;
        let next = self.plan.objects[index].rotation.next();
        self.update_object(id, &ObjectChanges::rotation(next))?;
        Ok(next)
    }

    /// Remove an object. Removal never violates placement.
    pub fn delete_object(&mut self, id: &str) -> Result<PlacedObject, EditError> {
        let index = self.index_of(id)?;
        let mut objects = self.plan.objects.clone();
        let removed = objects.remove(index);
        self.commit(objects);
        Ok(removed)
    }

    /// Remove every object, returning how many were removed
    pub fn clear_all(&mut self) -> usize {
        let count = self.plan.objects.len();
        self.commit(Vec::new());
        count
    }

    fn validate_candidate(
        &self,
        candidate: &PlacedObject,
        exclude_id: Option<&str>,
        check_level: bool,
        check_geometry: bool,
    ) -> Result<(), Rejection> {
        let result = self.check_candidate(candidate, exclude_id, check_level, check_geometry);
        if let Err(rejection) = &result {
            tracing::debug!(
                "rejected {} at ({}, {}) rotation {}: {rejection}",
                candidate.type_id,
                candidate.grid_x,
                candidate.grid_y,
                candidate.rotation
            );
        }
        result
    }

    fn check_candidate(
        &self,
        candidate: &PlacedObject,
        exclude_id: Option<&str>,
        check_level: bool,
        check_geometry: bool,
    ) -> Result<(), Rejection> {
        let validator = self.validator();
        if check_level {
            validator.check_level(&candidate.type_id, candidate.level)?;
        }
        if check_geometry {
            validator.check(candidate, exclude_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{EditError, Rejection};
    use crate::fixtures::plan_state;
    use shared::{ObjectChanges, Rotation};

    #[test]
    fn test_add_object() {
        let mut state = plan_state(10, 10);
        let obj = state.add_object("square", 0, 0, 1).unwrap();
        assert_eq!(obj.rotation, Rotation::Deg0);
        assert_eq!(obj.level, 1);
        assert!(!obj.id.is_empty());
        assert_eq!(state.objects().len(), 1);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.version(), 1);
    }

    #[test]
    fn test_add_ids_unique() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("single", 0, 0, 1).unwrap();
        let b = state.add_object("single", 1, 0, 1).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_add_unknown_type_rejected() {
        let mut state = plan_state(10, 10);
        let err = state.add_object("unknown-type", 0, 0, 1).unwrap_err();
        assert_eq!(err, EditError::Rejected(Rejection::UnknownType("unknown-type".into())));
        assert!(state.objects().is_empty());
        assert!(state.history().is_empty());
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_add_level_out_of_range() {
        let mut state = plan_state(10, 10);
        let err = state.add_object("square", 0, 0, 6).unwrap_err();
        assert_eq!(err.rejection().map(|r| r.code()), Some("level_out_of_range"));
        let err = state.add_object("square", 0, 0, 0).unwrap_err();
        assert_eq!(err.rejection().map(|r| r.code()), Some("level_out_of_range"));
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_add_respects_grid_height() {
        let mut state = plan_state(10, 4);
        assert!(state.add_object("square", 0, 2, 1).is_ok());
        let err = state.add_object("square", 4, 3, 1).unwrap_err();
        assert_eq!(err, EditError::Rejected(Rejection::OutOfBounds));
    }

    #[test]
    fn test_rejection_is_repeatable() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("square", 0, 0, 1).unwrap();
        let before = state.objects().to_vec();
        for _ in 0..3 {
            let err = state.add_object("square", 1, 1, 1).unwrap_err();
            assert_eq!(err, EditError::Rejected(Rejection::Overlap { with: a.id.clone() }));
            assert_eq!(state.objects(), &before[..]);
            assert_eq!(state.history().len(), 1);
        }
    }

    #[test]
    fn test_move_object() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("square", 0, 0, 1).unwrap();
        state.add_object("square", 4, 0, 1).unwrap();

        let moved = state.move_object(&a.id, 1, 0).unwrap();
        assert_eq!((moved.grid_x, moved.grid_y), (1, 0));

        let err = state.move_object(&a.id, 3, 0).unwrap_err();
        assert!(matches!(err, EditError::Rejected(Rejection::Overlap { .. })));
        assert_eq!(state.get_object(&a.id).unwrap().grid_x, 1);

        let err = state.move_object(&a.id, -1, 0).unwrap_err();
        assert_eq!(err, EditError::Rejected(Rejection::OutOfBounds));
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn test_rotate_swaps_footprint() {
        let mut state = plan_state(10, 10);
        let wide = state.add_object("wide", 0, 0, 1).unwrap();
        state.add_object("single", 0, 2, 1).unwrap();

        // upright 1x3 would cover (0,2)
        let err = state.rotate_object(&wide.id).unwrap_err();
        assert!(matches!(err, EditError::Rejected(Rejection::Overlap { .. })));
        assert_eq!(state.get_object(&wide.id).unwrap().rotation, Rotation::Deg0);

        state.move_object(&wide.id, 1, 0).unwrap();
        assert_eq!(state.rotate_object(&wide.id).unwrap(), Rotation::Deg90);
        assert_eq!(state.rotate_object(&wide.id).unwrap(), Rotation::Deg180);
        assert_eq!(state.rotate_object(&wide.id).unwrap(), Rotation::Deg270);
        assert_eq!(state.rotate_object(&wide.id).unwrap(), Rotation::Deg0);
    }

    #[test]
    fn test_rotate_out_of_bounds_rejected() {
        let mut state = plan_state(10, 10);
        let wide = state.add_object("wide", 0, 9, 1).unwrap();
        let err = state.rotate_object(&wide.id).unwrap_err();
        assert_eq!(err, EditError::Rejected(Rejection::OutOfBounds));
    }

    #[test]
    fn test_update_non_geometric_fields() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("square", 0, 0, 1).unwrap();
        let changes = ObjectChanges {
            level: Some(5),
            label: Some("R5 Marshal".into()),
            notes: Some("center".into()),
            ..Default::default()
        };
        let updated = state.update_object(&a.id, &changes).unwrap();
        assert_eq!(updated.level, 5);
        assert_eq!(updated.label.as_deref(), Some("R5 Marshal"));
        assert_eq!(updated.notes.as_deref(), Some("center"));
        assert_eq!(state.history().len(), 2);

        let err = state.update_object(&a.id, &ObjectChanges::level(6)).unwrap_err();
        assert_eq!(err, EditError::Rejected(Rejection::LevelOutOfRange { level: 6, max: 5 }));
        assert_eq!(state.get_object(&a.id).unwrap().level, 5);
    }

    #[test]
    fn test_empty_update_records_nothing() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("square", 0, 0, 1).unwrap();
        let version = state.version();

        let same = state.update_object(&a.id, &ObjectChanges::default()).unwrap();
        assert_eq!(same, a);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.version(), version);
        assert_eq!(
            state.update_object("missing", &ObjectChanges::default()).unwrap_err(),
            EditError::UnknownObject("missing".into())
        );
    }

    #[test]
    fn test_unknown_object_is_distinct_error() {
        let mut state = plan_state(10, 10);
        assert_eq!(
            state.move_object("missing", 0, 0).unwrap_err(),
            EditError::UnknownObject("missing".into())
        );
        assert_eq!(
            state.rotate_object("missing").unwrap_err(),
            EditError::UnknownObject("missing".into())
        );
        assert_eq!(
            state.delete_object("missing").unwrap_err(),
            EditError::UnknownObject("missing".into())
        );
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_delete_and_clear() {
        let mut state = plan_state(10, 10);
        let a = state.add_object("square", 0, 0, 1).unwrap();
        state.add_object("square", 2, 0, 1).unwrap();
        state.add_object("square", 4, 0, 1).unwrap();

        let removed = state.delete_object(&a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(state.objects().len(), 2);

        assert_eq!(state.clear_all(), 2);
        assert!(state.objects().is_empty());
        assert_eq!(state.history().len(), 5);
    }

    #[test]
    fn test_commit_stamps_updated_at() {
        let mut state = plan_state(10, 10);
        let before = state.plan().updated_at;
        state.add_object("square", 0, 0, 1).unwrap();
        assert!(state.plan().updated_at > before);
    }
}
