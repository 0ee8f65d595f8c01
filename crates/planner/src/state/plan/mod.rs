//! Plan state management
//!
//! This module provides the active plan with its objects and undo/redo history.

mod details;
mod display;
mod history;
mod object_ops;
mod template_ops;

pub use display::{object_display_name, short_id};

use std::sync::Arc;

use shared::{HivePlan, PlacedObject, PlanSnapshot};

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::error::{EditError, Rejection};
use crate::history::EditorHistory;
use crate::validation::PlacementValidator;

/// Active plan with undo/redo history
pub struct PlanState {
    /// The plan being edited
    pub(crate) plan: HivePlan,
    /// Snapshots of the object collection before each mutation
    pub(crate) history: EditorHistory,
    pub(crate) catalog: Arc<dyn Catalog>,
    pub(crate) clock: Arc<dyn Clock>,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl PlanState {
    /// Open a plan with an empty history.
    pub fn new(
        plan: HivePlan,
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
        history_capacity: usize,
    ) -> Self {
        Self {
            plan,
            history: EditorHistory::new(history_capacity),
            catalog,
            clock,
            version: 0,
        }
    }

    /// The plan being edited
    pub fn plan(&self) -> &HivePlan {
        &self.plan
    }

    /// Read-only view of the placed objects
    pub fn objects(&self) -> &[PlacedObject] {
        &self.plan.objects
    }

    /// Get an object by ID
    pub fn get_object(&self, id: &str) -> Option<&PlacedObject> {
        self.plan.get_object(id)
    }

    pub fn catalog(&self) -> &dyn Catalog {
        &*self.catalog
    }

    pub fn history(&self) -> &EditorHistory {
        &self.history
    }

    /// Current plan version (increments on every change)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Validator over the current objects and grid
    pub fn validator(&self) -> PlacementValidator<'_> {
        PlacementValidator::for_plan(&*self.catalog, &self.plan)
    }

    /// Check a candidate without changing anything
    pub fn check_placement(
        &self,
        candidate: &PlacedObject,
        exclude_id: Option<&str>,
    ) -> Result<(), Rejection> {
        self.validator().check(candidate, exclude_id)
    }

    pub(crate) fn index_of(&self, id: &str) -> Result<usize, EditError> {
        self.plan
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| EditError::UnknownObject(id.to_string()))
    }

    /// Replace the objects, recording the previous collection for undo
    pub(crate) fn commit(&mut self, objects: PlanSnapshot) {
        let previous = std::mem::replace(&mut self.plan.objects, objects);
        self.history.record(previous);
        self.touch();
    }

    /// Stamp the plan as modified
    pub(crate) fn touch(&mut self) {
        self.plan.updated_at = self.clock.now_millis();
        self.version += 1;
    }
}

pub(crate) fn new_object_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
