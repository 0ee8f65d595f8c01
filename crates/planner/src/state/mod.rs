//! Editor state: plans, the active plan's history, settings.

pub mod library;
pub mod plan;
pub mod settings;

pub use library::PlanLibrary;
pub use plan::{object_display_name, short_id, PlanState};
pub use settings::{EditorSettings, GridSettings, HistorySettings};
