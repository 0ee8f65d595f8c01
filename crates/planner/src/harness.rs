//! Headless editor session.
//!
//! Drives a [`PlanLibrary`] the way the editor UI would: a selected object,
//! boolean undo/redo, JSON load and export. Used by the command protocol and
//! by integration tests.

use std::sync::Arc;

use shared::{ObjectId, PlacedObject, PlanId};

use crate::catalog::{BuildingCatalog, Catalog};
use crate::clock::{Clock, SystemClock};
use crate::error::{EditError, LibraryError};
use crate::state::{EditorSettings, PlanLibrary, PlanState};
use crate::stats::PlanStats;

pub struct TestHarness {
    pub library: PlanLibrary,
    selected: Option<ObjectId>,
}

impl TestHarness {
    /// Session over the standard hive catalog and the system clock.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self::with_parts(
            settings,
            Arc::new(BuildingCatalog::hive_defaults()),
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        settings: EditorSettings,
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::from_library(PlanLibrary::new(settings, catalog, clock))
    }

    pub fn from_library(library: PlanLibrary) -> Self {
        Self {
            library,
            selected: None,
        }
    }

    /// The active plan
    pub fn state(&self) -> &PlanState {
        self.library.active()
    }

    pub fn state_mut(&mut self) -> &mut PlanState {
        self.library.active_mut()
    }

    // ── Editing ───────────────────────────────────────────────

    /// Place a level-1 object and return its ID
    pub fn place(&mut self, type_id: &str, x: i32, y: i32) -> Result<ObjectId, EditError> {
        self.place_at_level(type_id, x, y, 1)
    }

    pub fn place_at_level(
        &mut self,
        type_id: &str,
        x: i32,
        y: i32,
        level: u32,
    ) -> Result<ObjectId, EditError> {
        self.state_mut()
            .add_object(type_id, x, y, level)
            .map(|o| o.id)
    }

    /// Delete an object, dropping it from the selection
    pub fn delete(&mut self, id: &str) -> Result<PlacedObject, EditError> {
        let removed = self.state_mut().delete_object(id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    /// Remove every object
    pub fn clear(&mut self) -> usize {
        self.selected = None;
        self.state_mut().clear_all()
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        let undone = self.state_mut().undo().is_ok();
        self.drop_stale_selection();
        undone
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        let redone = self.state_mut().redo().is_ok();
        self.drop_stale_selection();
        redone
    }

    // ── Selection ─────────────────────────────────────────────

    /// Select an object. Returns false if it does not exist.
    pub fn select(&mut self, id: &str) -> bool {
        let exists = self.state().get_object(id).is_some();
        if exists {
            self.selected = Some(id.to_string());
        }
        exists
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&PlacedObject> {
        self.selected
            .as_deref()
            .and_then(|id| self.state().get_object(id))
    }

    fn drop_stale_selection(&mut self) {
        if self.selected().is_none() {
            self.selected = None;
        }
    }

    // ── Plans ─────────────────────────────────────────────────

    pub fn create_plan(&mut self, name: &str) -> PlanId {
        self.selected = None;
        self.library.create_plan(name)
    }

    pub fn switch_plan(&mut self, id: &str) -> Result<(), LibraryError> {
        self.library.switch_plan(id)?;
        self.selected = None;
        Ok(())
    }

    pub fn delete_plan(&mut self, id: &str) -> Result<(), LibraryError> {
        self.library.delete_plan(id)?;
        self.drop_stale_selection();
        Ok(())
    }

    /// Import a plan from JSON and open it
    pub fn load_plan_json(&mut self, json: &str) -> Result<PlanId, LibraryError> {
        let id = self.library.import_json(json)?;
        self.selected = None;
        Ok(id)
    }

    /// Export the active plan as JSON
    pub fn export_plan_json(&self) -> Result<String, serde_json::Error> {
        self.library.export_json()
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of objects in the active plan
    pub fn object_count(&self) -> usize {
        self.state().objects().len()
    }

    pub fn stats(&self) -> PlanStats {
        PlanStats::compute(self.state().objects(), self.state().catalog())
    }

    /// Problems with the active plan; empty when every invariant holds
    pub fn problems(&self) -> Vec<String> {
        self.state().validator().validate_all()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
