//! Error types for placement, editing, history and the plan library.

use shared::{ObjectId, PlanId};
use thiserror::Error;

/// Why a placement was refused. These are routine outcomes, not failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown building type `{0}`")]
    UnknownType(String),
    #[error("footprint extends outside the grid")]
    OutOfBounds,
    #[error("footprint overlaps object `{with}`")]
    Overlap { with: ObjectId },
    #[error("level {level} is outside 1..={max}")]
    LevelOutOfRange { level: u32, max: u32 },
}

impl Rejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::UnknownType(_) => "unknown_type",
            Rejection::OutOfBounds => "out_of_bounds",
            Rejection::Overlap { .. } => "overlap",
            Rejection::LevelOutOfRange { .. } => "level_out_of_range",
        }
    }
}

/// Result of a mutation on the active plan.
///
/// `UnknownObject` means the caller referenced an id that is not in the plan,
/// which is misuse rather than a grid conflict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("placement rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("no object with id `{0}`")]
    UnknownObject(ObjectId),
}

impl EditError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            EditError::Rejected(r) => Some(r),
            EditError::UnknownObject(_) => None,
        }
    }
}

/// Undo/redo at a history boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}

/// Errors from plan lifecycle operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("plan `{0}` not found")]
    PlanNotFound(PlanId),
    #[error("invalid plan: {}", .0.join("; "))]
    InvalidPlan(Vec<String>),
    #[error("plan JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
