//! Factory functions for creating test data.
//!
//! Shared by unit tests, integration tests and the command harness.

use std::sync::Arc;

use shared::{BuildingCategory, BuildingType, HivePlan, PlacedObject, Rotation};

use crate::catalog::BuildingCatalog;
use crate::clock::ManualClock;
use crate::state::{EditorSettings, PlanLibrary, PlanState};

// ── Catalog ─────────────────────────────────────────────────────

fn test_type(id: &str, width: u32, height: u32, max_level: u32) -> BuildingType {
    BuildingType {
        id: id.to_string(),
        name: id.to_string(),
        category: BuildingCategory::Special,
        width,
        height,
        color: String::new(),
        icon: String::new(),
        max_level,
        description: String::new(),
    }
}

/// Small catalog: `square` 2x2, `wide` 3x1 (both up to level 5) and
/// `single` 1x1 (level 1 only).
pub fn test_catalog() -> BuildingCatalog {
    BuildingCatalog::new(vec![
        test_type("square", 2, 2, 5),
        test_type("wide", 3, 1, 5),
        test_type("single", 1, 1, 1),
    ])
}

// ── Objects and plans ───────────────────────────────────────────

/// Level-1 object with rotation 0
pub fn object(id: &str, type_id: &str, x: i32, y: i32) -> PlacedObject {
    PlacedObject::new(id, type_id, x, y)
}

pub fn object_rotated(id: &str, type_id: &str, x: i32, y: i32, rotation: Rotation) -> PlacedObject {
    PlacedObject {
        rotation,
        ..object(id, type_id, x, y)
    }
}

/// Empty plan stamped at time 0
pub fn empty_plan(id: &str, width: u32, height: u32) -> HivePlan {
    HivePlan::empty(id, "Test Plan", width, height, 0)
}

/// Fresh plan state over [`test_catalog`] with a ticking manual clock
pub fn plan_state(width: u32, height: u32) -> PlanState {
    PlanState::new(
        empty_plan("plan", width, height),
        Arc::new(test_catalog()),
        Arc::new(ManualClock::new(1_000, 1)),
        crate::history::DEFAULT_HISTORY_CAPACITY,
    )
}

/// Settings for a 10x10 grid with default history capacity
pub fn small_grid_settings() -> EditorSettings {
    let mut settings = EditorSettings::default();
    settings.grid.width = 10;
    settings.grid.height = 10;
    settings
}

/// Library over [`test_catalog`] with one empty 10x10 plan
pub fn plan_library() -> PlanLibrary {
    PlanLibrary::new(
        small_grid_settings(),
        Arc::new(test_catalog()),
        Arc::new(ManualClock::new(1_000, 1)),
    )
}
