//! Template application

use shared::{PlacedObject, PlanSnapshot};

use crate::error::EditError;
use crate::templates::HiveTemplate;
use crate::validation::PlacementValidator;

use super::{new_object_id, PlanState};

impl PlanState {
    /// Replace every object with a copy of the template's objects under
    /// fresh ids. All-or-nothing: if any object is rejected on this plan's
    /// grid, the plan is left unchanged.
    pub fn apply_template(&mut self, template: &HiveTemplate) -> Result<usize, EditError> {
        let mut placed: PlanSnapshot = Vec::with_capacity(template.objects.len());

        for source in &template.objects {
            let candidate = PlacedObject {
                id: new_object_id(),
                ..source.clone()
            };
            {
                let validator = PlacementValidator::new(
                    &*self.catalog,
                    &placed,
                    self.plan.grid_width,
                    self.plan.grid_height,
                );
                let checked = validator
                    .check_level(&candidate.type_id, candidate.level)
                    .and_then(|()| validator.check(&candidate, None));
                if let Err(rejection) = checked {
                    tracing::debug!(
                        "template {} rejected at slot {}: {rejection}",
                        template.id,
                        source.id
                    );
                    return Err(rejection.into());
                }
            }
            placed.push(candidate);
        }

        let count = placed.len();
        self.commit(placed);
        tracing::info!("applied template {} ({count} objects)", template.id);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::catalog::BuildingCatalog;
    use crate::clock::ManualClock;
    use crate::error::{EditError, Rejection};
    use crate::fixtures::empty_plan;
    use crate::state::plan::PlanState;
    use crate::templates::find_template;

    fn hive_state(size: u32) -> PlanState {
        PlanState::new(
            empty_plan("p", size, size),
            Arc::new(BuildingCatalog::hive_defaults()),
            Arc::new(ManualClock::new(1, 1)),
            50,
        )
    }

    #[test]
    fn test_apply_template_replaces_objects() {
        let mut state = hive_state(50);
        state.add_object("wall", 0, 0, 1).unwrap();
        let template = find_template("diamond-defense").unwrap();

        let count = state.apply_template(&template).unwrap();
        assert_eq!(count, 17);
        assert_eq!(state.objects().len(), 17);
        assert!(state.objects().iter().all(|o| !o.id.starts_with("t1-")));
        assert!(state.validator().validate_all().is_empty());

        state.undo().unwrap();
        assert_eq!(state.objects().len(), 1);
    }

    #[test]
    fn test_apply_template_fresh_ids_each_time() {
        let mut state = hive_state(50);
        let template = find_template("compact-farm").unwrap();
        state.apply_template(&template).unwrap();
        let first: Vec<_> = state.objects().iter().map(|o| o.id.clone()).collect();
        state.apply_template(&template).unwrap();
        assert!(state.objects().iter().all(|o| !first.contains(&o.id)));
    }

    #[test]
    fn test_apply_template_too_small_grid_is_atomic() {
        let mut state = hive_state(20);
        let wall = state.add_object("wall", 0, 0, 1).unwrap();
        let template = find_template("anti-air-fortress").unwrap();

        let err = state.apply_template(&template).unwrap_err();
        assert_eq!(err, EditError::Rejected(Rejection::OutOfBounds));
        assert_eq!(state.objects().len(), 1);
        assert_eq!(state.objects()[0].id, wall.id);
        assert_eq!(state.history().len(), 1);
    }
}
