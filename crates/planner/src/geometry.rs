//! Grid geometry: rotation-aware footprints and half-open rectangles.
//!
//! All functions are pure. Coordinates are widened to `i64` so that no
//! combination of `i32` positions and `u32` sizes can overflow.

use shared::{BuildingType, PlacedObject, Rotation};

/// Half-open grid rectangle: `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

impl Rect {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

/// Effective (width, height) after rotation. 90 and 270 swap the axes,
/// 0 and 180 leave them unchanged.
pub fn footprint(width: u32, height: u32, rotation: Rotation) -> (u32, u32) {
    if rotation.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    }
}

/// Rectangle covered by a footprint whose top-left cell is `(grid_x, grid_y)`.
pub fn bounds(grid_x: i32, grid_y: i32, width: u32, height: u32) -> Rect {
    let left = i64::from(grid_x);
    let top = i64::from(grid_y);
    Rect {
        left,
        right: left + i64::from(width),
        top,
        bottom: top + i64::from(height),
    }
}

/// Separating-axis test for half-open rectangles. Touching edges do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right <= b.left || a.left >= b.right || a.bottom <= b.top || a.top >= b.bottom)
}

/// True if `rect` lies entirely inside `[0, grid_width) x [0, grid_height)`.
pub fn within_grid(rect: &Rect, grid_width: u32, grid_height: u32) -> bool {
    rect.left >= 0
        && rect.top >= 0
        && rect.right <= i64::from(grid_width)
        && rect.bottom <= i64::from(grid_height)
}

/// Rectangle occupied by a placed object of the given type.
pub fn object_bounds(object: &PlacedObject, building: &BuildingType) -> Rect {
    let (w, h) = footprint(building.width, building.height, object.rotation);
    bounds(object.grid_x, object.grid_y, w, h)
}
