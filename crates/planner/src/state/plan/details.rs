//! Plan metadata: name, description and game-world origin.
//!
//! These edits stamp `updated_at` but are not recorded in history.

use shared::PlacedObject;

use super::PlanState;

impl PlanState {
    /// Rename the plan
    pub fn rename(&mut self, name: impl Into<String>) {
        self.plan.name = name.into();
        self.touch();
    }

    /// Replace the plan description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.plan.description = description.into();
        self.touch();
    }

    /// Set the game coordinates of grid cell (0, 0)
    pub fn set_origin(&mut self, origin_x: i32, origin_y: i32) {
        self.plan.origin_x = Some(origin_x);
        self.plan.origin_y = Some(origin_y);
        self.touch();
    }

    /// Game coordinates of an object's top-left cell, offset by the origin
    pub fn game_coordinates(&self, object: &PlacedObject) -> (i64, i64) {
        let ox = i64::from(self.plan.origin_x.unwrap_or(0));
        let oy = i64::from(self.plan.origin_y.unwrap_or(0));
        (ox + i64::from(object.grid_x), oy + i64::from(object.grid_y))
    }
}
