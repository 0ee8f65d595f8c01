//! Placement validation.
//!
//! `PlacementValidator` answers whether a candidate object fits the grid
//! and stays clear of every other object, and can audit a whole plan.
//! It never mutates anything.

use shared::{BuildingType, HivePlan, PlacedObject};

use crate::catalog::Catalog;
use crate::error::Rejection;
use crate::geometry::{object_bounds, overlaps, within_grid};

/// Validator over one collection of placed objects on a fixed grid.
pub struct PlacementValidator<'a> {
    catalog: &'a dyn Catalog,
    objects: &'a [PlacedObject],
    grid_width: u32,
    grid_height: u32,
}

impl<'a> PlacementValidator<'a> {
    pub fn new(
        catalog: &'a dyn Catalog,
        objects: &'a [PlacedObject],
        grid_width: u32,
        grid_height: u32,
    ) -> Self {
        Self {
            catalog,
            objects,
            grid_width,
            grid_height,
        }
    }

    /// Validator over a plan's own objects and grid.
    pub fn for_plan(catalog: &'a dyn Catalog, plan: &'a HivePlan) -> Self {
        Self::new(catalog, &plan.objects, plan.grid_width, plan.grid_height)
    }

    fn resolve(&self, type_id: &str) -> Result<&'a BuildingType, Rejection> {
        self.catalog
            .get_type(type_id)
            .ok_or_else(|| Rejection::UnknownType(type_id.to_string()))
    }

    /// Check that `candidate` fits the grid and overlaps nothing except
    /// possibly the object with id `exclude_id`.
    ///
    /// Existing objects whose type is missing from the catalog have no
    /// footprint and are skipped.
    pub fn check(
        &self,
        candidate: &PlacedObject,
        exclude_id: Option<&str>,
    ) -> Result<(), Rejection> {
        let building = self.resolve(&candidate.type_id)?;
        let rect = object_bounds(candidate, building);

        if !within_grid(&rect, self.grid_width, self.grid_height) {
            return Err(Rejection::OutOfBounds);
        }

        for existing in self.objects {
            if exclude_id == Some(existing.id.as_str()) {
                continue;
            }
            let Some(existing_type) = self.catalog.get_type(&existing.type_id) else {
                tracing::warn!(
                    "skipping object {} with unknown type {}",
                    existing.id,
                    existing.type_id
                );
                continue;
            };
            if overlaps(&rect, &object_bounds(existing, existing_type)) {
                return Err(Rejection::Overlap {
                    with: existing.id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Boolean form of [`check`](Self::check).
    pub fn can_place(&self, candidate: &PlacedObject, exclude_id: Option<&str>) -> bool {
        self.check(candidate, exclude_id).is_ok()
    }

    /// Check that `level` is within `1..=max_level` for the type.
    pub fn check_level(&self, type_id: &str, level: u32) -> Result<(), Rejection> {
        let building = self.resolve(type_id)?;
        if level < 1 || level > building.max_level {
            return Err(Rejection::LevelOutOfRange {
                level,
                max: building.max_level,
            });
        }
        Ok(())
    }

    /// Audit every object in the collection and return a list of problems.
    /// An empty list means the collection satisfies every placement invariant.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, object) in self.objects.iter().enumerate() {
            if self.objects[..i].iter().any(|o| o.id == object.id) {
                errors.push(format!("Duplicate object id {}", object.id));
            }

            let Some(building) = self.catalog.get_type(&object.type_id) else {
                errors.push(format!(
                    "Object {} has unknown type {}",
                    object.id, object.type_id
                ));
                continue;
            };

            if let Err(e) = self.check_level(&object.type_id, object.level) {
                errors.push(format!("Object {}: {e}", object.id));
            }

            let rect = object_bounds(object, building);
            if !within_grid(&rect, self.grid_width, self.grid_height) {
                errors.push(format!(
                    "Object {} at ({}, {}) extends outside the {}x{} grid",
                    object.id, object.grid_x, object.grid_y, self.grid_width, self.grid_height
                ));
            }

            // Each pair is reported once, from its later member.
            for earlier in &self.objects[..i] {
                let Some(earlier_type) = self.catalog.get_type(&earlier.type_id) else {
                    continue;
                };
                if overlaps(&rect, &object_bounds(earlier, earlier_type)) {
                    errors.push(format!("Objects {} and {} overlap", earlier.id, object.id));
                }
            }
        }

        errors
    }
}

/// Audit a whole plan against the catalog.
pub fn validate_plan(plan: &HivePlan, catalog: &dyn Catalog) -> Vec<String> {
    PlacementValidator::for_plan(catalog, plan).validate_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{object, object_rotated, test_catalog};
    use shared::Rotation;

    #[test]
    fn test_accepts_on_empty_grid() {
        let catalog = test_catalog();
        let v = PlacementValidator::new(&catalog, &[], 10, 10);
        assert!(v.can_place(&object("a", "square", 0, 0), None));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let catalog = test_catalog();
        let v = PlacementValidator::new(&catalog, &[], 10, 10);
        assert_eq!(
            v.check(&object("a", "nope", 0, 0), None),
            Err(Rejection::UnknownType("nope".into()))
        );
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let catalog = test_catalog();
        let v = PlacementValidator::new(&catalog, &[], 10, 10);
        assert_eq!(
            v.check(&object("a", "square", 9, 0), None),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            v.check(&object("a", "square", -1, 0), None),
            Err(Rejection::OutOfBounds)
        );
    }

    #[test]
    fn test_bounds_use_rotated_footprint() {
        let catalog = test_catalog();
        let v = PlacementValidator::new(&catalog, &[], 10, 10);
        // "wide" is 3x1: fits at x=7 unrotated, not when turned upright at y=8
        assert!(v.can_place(&object("a", "wide", 7, 9), None));
        assert!(!v.can_place(&object_rotated("a", "wide", 7, 8, Rotation::Deg90), None));
        assert!(v.can_place(&object_rotated("a", "wide", 9, 7, Rotation::Deg270), None));
    }

    #[test]
    fn test_rejects_overlap_naming_other_object() {
        let catalog = test_catalog();
        let existing = vec![object("a", "square", 0, 0)];
        let v = PlacementValidator::new(&catalog, &existing, 10, 10);
        assert_eq!(
            v.check(&object("b", "square", 1, 1), None),
            Err(Rejection::Overlap { with: "a".into() })
        );
        assert!(v.can_place(&object("b", "square", 2, 0), None));
    }

    #[test]
    fn test_exclude_id_ignores_self() {
        let catalog = test_catalog();
        let existing = vec![object("a", "square", 0, 0)];
        let v = PlacementValidator::new(&catalog, &existing, 10, 10);
        let moved = object("a", "square", 1, 0);
        assert!(!v.can_place(&moved, None));
        assert!(v.can_place(&moved, Some("a")));
    }

    #[test]
    fn test_existing_unknown_type_is_skipped() {
        let catalog = test_catalog();
        let existing = vec![object("ghost", "nope", 0, 0)];
        let v = PlacementValidator::new(&catalog, &existing, 10, 10);
        assert!(v.can_place(&object("a", "square", 0, 0), None));
    }

    #[test]
    fn test_check_level() {
        let catalog = test_catalog();
        let v = PlacementValidator::new(&catalog, &[], 10, 10);
        assert!(v.check_level("square", 1).is_ok());
        assert!(v.check_level("square", 5).is_ok());
        assert_eq!(
            v.check_level("square", 6),
            Err(Rejection::LevelOutOfRange { level: 6, max: 5 })
        );
        assert_eq!(
            v.check_level("square", 0),
            Err(Rejection::LevelOutOfRange { level: 0, max: 5 })
        );
    }

    #[test]
    fn test_validate_all_ok() {
        let catalog = test_catalog();
        let objects = vec![object("a", "square", 0, 0), object("b", "wide", 2, 0)];
        let v = PlacementValidator::new(&catalog, &objects, 10, 10);
        let errors = v.validate_all();
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_validate_all_reports_every_problem() {
        let catalog = test_catalog();
        let mut high = object("c", "square", 5, 5);
        high.level = 99;
        let objects = vec![
            object("a", "square", 0, 0),
            object("a", "square", 1, 1),
            object("b", "nope", 3, 3),
            high,
            object("d", "square", 9, 9),
        ];
        let v = PlacementValidator::new(&catalog, &objects, 10, 10);
        let errors = v.validate_all();
        assert!(errors.iter().any(|e| e.contains("Duplicate object id a")));
        assert!(errors.iter().any(|e| e.contains("overlap")));
        assert!(errors.iter().any(|e| e.contains("unknown type nope")));
        assert!(errors.iter().any(|e| e.contains("level 99")));
        assert!(errors.iter().any(|e| e.contains("outside the 10x10 grid")));
    }
}
