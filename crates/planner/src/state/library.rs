//! Plan library: every saved plan plus the one open for editing.
//!
//! Only the active plan carries an undo history. Opening another plan
//! (switch, create, import, or deleting the active one) starts a fresh
//! history.

use std::sync::Arc;

use shared::{HivePlan, PlanId};

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::error::LibraryError;
use crate::state::plan::PlanState;
use crate::state::settings::EditorSettings;
use crate::validation::validate_plan;

/// Name given to the replacement plan when the last plan is deleted
const FALLBACK_PLAN_NAME: &str = "My Hive";

pub struct PlanLibrary {
    /// All plans in creation order. The entry for the active plan is
    /// refreshed whenever another plan is opened.
    plans: Vec<HivePlan>,
    active: PlanState,
    settings: EditorSettings,
    catalog: Arc<dyn Catalog>,
    clock: Arc<dyn Clock>,
}

impl PlanLibrary {
    /// Library with a single empty plan named from the settings
    pub fn new(settings: EditorSettings, catalog: Arc<dyn Catalog>, clock: Arc<dyn Clock>) -> Self {
        Self::from_plans(Vec::new(), None, settings, catalog, clock)
    }

    /// Library over existing plans. Opens `current` if present, else the
    /// first plan, else a new empty plan.
    pub fn from_plans(
        mut plans: Vec<HivePlan>,
        current: Option<&str>,
        settings: EditorSettings,
        catalog: Arc<dyn Catalog>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        if plans.is_empty() {
            plans.push(empty_plan(&settings, &*clock, &settings.default_plan_name));
        }
        let index = current
            .and_then(|id| plans.iter().position(|p| p.id == id))
            .unwrap_or(0);
        let active = PlanState::new(
            plans[index].clone(),
            catalog.clone(),
            clock.clone(),
            settings.history.capacity,
        );
        Self {
            plans,
            active,
            settings,
            catalog,
            clock,
        }
    }

    /// The plan open for editing
    pub fn active(&self) -> &PlanState {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut PlanState {
        &mut self.active
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &dyn Catalog {
        &*self.catalog
    }

    /// All plans, with the active one reflecting unsaved edits
    pub fn plans(&self) -> impl Iterator<Item = &HivePlan> {
        let active = self.active.plan();
        self.plans
            .iter()
            .map(move |p| if p.id == active.id { active } else { p })
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    /// Create an empty plan with the configured grid size and open it
    pub fn create_plan(&mut self, name: &str) -> PlanId {
        let plan = empty_plan(&self.settings, &*self.clock, name);
        let id = plan.id.clone();
        self.write_back();
        self.plans.push(plan.clone());
        self.replace_active(plan);
        tracing::info!("created plan {id} ({name})");
        id
    }

    /// Open a plan, the active one included. History starts empty.
    pub fn switch_plan(&mut self, id: &str) -> Result<(), LibraryError> {
        let index = self.index_of(id)?;
        self.write_back();
        let plan = self.plans[index].clone();
        self.replace_active(plan);
        tracing::info!("switched to plan {id}");
        Ok(())
    }

    /// Delete a plan. Deleting the active plan opens the first remaining
    /// plan, or a new empty one when none remain.
    pub fn delete_plan(&mut self, id: &str) -> Result<(), LibraryError> {
        let index = self.index_of(id)?;
        self.plans.remove(index);
        tracing::info!("deleted plan {id}");

        if self.active.plan().id == id {
            match self.plans.first().cloned() {
                Some(next) => self.replace_active(next),
                None => {
                    self.create_plan(FALLBACK_PLAN_NAME);
                }
            }
        }
        Ok(())
    }

    /// Add a plan from outside the editor and open it.
    ///
    /// The plan must satisfy every placement invariant. It gets a new id so
    /// importing the same file twice yields two plans.
    pub fn import_plan(&mut self, mut plan: HivePlan) -> Result<PlanId, LibraryError> {
        let errors = validate_plan(&plan, &*self.catalog);
        if !errors.is_empty() {
            tracing::debug!("rejected import of {}: {} problems", plan.name, errors.len());
            return Err(LibraryError::InvalidPlan(errors));
        }

        plan.id = uuid::Uuid::new_v4().to_string();
        plan.updated_at = self.clock.now_millis();
        let id = plan.id.clone();
        self.write_back();
        self.plans.push(plan.clone());
        self.replace_active(plan);
        tracing::info!("imported plan {id}");
        Ok(id)
    }

    /// Parse and import a plan from JSON
    pub fn import_json(&mut self, json: &str) -> Result<PlanId, LibraryError> {
        let plan: HivePlan = serde_json::from_str(json)?;
        self.import_plan(plan)
    }

    /// Export the active plan as pretty JSON
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.active.plan())
    }

    fn index_of(&self, id: &str) -> Result<usize, LibraryError> {
        self.plans
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LibraryError::PlanNotFound(id.to_string()))
    }

    /// Copy the active plan's edits into its list entry
    fn write_back(&mut self) {
        let active = self.active.plan();
        if let Some(slot) = self.plans.iter_mut().find(|p| p.id == active.id) {
            *slot = active.clone();
        }
    }

    fn replace_active(&mut self, plan: HivePlan) {
        self.active = PlanState::new(
            plan,
            self.catalog.clone(),
            self.clock.clone(),
            self.settings.history.capacity,
        );
    }
}

fn empty_plan(settings: &EditorSettings, clock: &dyn Clock, name: &str) -> HivePlan {
    HivePlan::empty(
        uuid::Uuid::new_v4().to_string(),
        name,
        settings.grid.width,
        settings.grid.height,
        clock.now_millis(),
    )
}
