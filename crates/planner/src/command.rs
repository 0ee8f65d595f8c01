//! JSON command protocol for scripted editing.

use serde::{Deserialize, Serialize};
use shared::{ObjectChanges, ObjectId, PlacedObject, Rotation};

use crate::error::{EditError, LibraryError};
use crate::harness::TestHarness;
use crate::state::object_display_name;
use crate::templates::{builtin_templates, find_template};

fn default_level() -> u32 {
    1
}

/// A command an external agent can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Place a new object
    AddObject {
        type_id: String,
        grid_x: i32,
        grid_y: i32,
        #[serde(default = "default_level")]
        level: u32,
    },
    /// Apply a partial change to an object
    UpdateObject {
        id: ObjectId,
        changes: ObjectChanges,
    },
    MoveObject {
        id: ObjectId,
        grid_x: i32,
        grid_y: i32,
    },
    /// Rotate 90° clockwise
    RotateObject {
        id: ObjectId,
    },
    DeleteObject {
        id: ObjectId,
    },
    /// Remove every object
    Clear,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Select an object by ID.
    Select {
        id: ObjectId,
    },
    /// Clear selection.
    ClearSelection,
    /// Replace the plan with a built-in template
    ApplyTemplate {
        template_id: String,
    },
    ListTemplates,
    CreatePlan {
        name: String,
    },
    SwitchPlan {
        id: String,
    },
    DeletePlan {
        id: String,
    },
    RenamePlan {
        name: String,
    },
    ListPlans,
    /// Check a placement without changing anything
    CanPlace {
        type_id: String,
        grid_x: i32,
        grid_y: i32,
        #[serde(default)]
        rotation: Rotation,
        #[serde(default)]
        exclude_id: Option<ObjectId>,
    },
    /// Inspect the plan: list all objects.
    Inspect,
    Stats,
    /// Export the plan as JSON.
    ExportPlan,
    /// Import a plan document and open it
    ImportPlan {
        plan: serde_json::Value,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }

    /// Failed edit; rejections carry their code in `data.reason`
    fn rejected(error: &EditError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            data: error
                .rejection()
                .map(|r| serde_json::json!({ "reason": r.code() })),
        }
    }

    fn library_err(error: &LibraryError) -> Self {
        let mut response = Self::err(error.to_string());
        if let LibraryError::InvalidPlan(problems) = error {
            response.data = Some(serde_json::json!({ "problems": problems }));
        }
        response
    }
}

fn object_json(object: &PlacedObject) -> serde_json::Value {
    serde_json::to_value(object).unwrap_or_default()
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddObject {
            type_id,
            grid_x,
            grid_y,
            level,
        } => match harness.state_mut().add_object(&type_id, grid_x, grid_y, level) {
            Ok(object) => CommandResponse::ok_with_data(object_json(&object)),
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::UpdateObject { id, changes } => {
            match harness.state_mut().update_object(&id, &changes) {
                Ok(object) => CommandResponse::ok_with_data(object_json(&object)),
                Err(e) => CommandResponse::rejected(&e),
            }
        }

        AgentCommand::MoveObject { id, grid_x, grid_y } => {
            match harness.state_mut().move_object(&id, grid_x, grid_y) {
                Ok(object) => CommandResponse::ok_with_data(object_json(&object)),
                Err(e) => CommandResponse::rejected(&e),
            }
        }

        AgentCommand::RotateObject { id } => match harness.state_mut().rotate_object(&id) {
            Ok(rotation) => {
                CommandResponse::ok_with_data(serde_json::json!({ "rotation": rotation }))
            }
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::DeleteObject { id } => match harness.delete(&id) {
            Ok(removed) => {
                CommandResponse::ok_with_data(serde_json::json!({ "removed": removed.id }))
            }
            Err(e) => CommandResponse::rejected(&e),
        },

        AgentCommand::Clear => {
            let removed = harness.clear();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        AgentCommand::Undo => {
            let success = harness.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        AgentCommand::Redo => {
            let success = harness.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        AgentCommand::Select { id } => {
            if harness.select(&id) {
                CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
            } else {
                CommandResponse::err(format!("no object with id `{id}`"))
            }
        }

        AgentCommand::ClearSelection => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        AgentCommand::ApplyTemplate { template_id } => {
            let Some(template) = find_template(&template_id) else {
                return CommandResponse::err(format!("unknown template `{template_id}`"));
            };
            harness.clear_selection();
            match harness.state_mut().apply_template(&template) {
                Ok(count) => CommandResponse::ok_with_data(serde_json::json!({ "placed": count })),
                Err(e) => CommandResponse::rejected(&e),
            }
        }

        AgentCommand::ListTemplates => {
            let templates: Vec<serde_json::Value> = builtin_templates()
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "name": t.name,
                        "category": t.category,
                        "object_count": t.objects.len(),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({ "templates": templates }))
        }

        AgentCommand::CreatePlan { name } => {
            let id = harness.create_plan(&name);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        AgentCommand::SwitchPlan { id } => match harness.switch_plan(&id) {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::library_err(&e),
        },

        AgentCommand::DeletePlan { id } => match harness.delete_plan(&id) {
            Ok(()) => CommandResponse::ok_with_data(
                serde_json::json!({ "active": harness.state().plan().id }),
            ),
            Err(e) => CommandResponse::library_err(&e),
        },

        AgentCommand::RenamePlan { name } => {
            harness.state_mut().rename(name);
            CommandResponse::ok()
        }

        AgentCommand::ListPlans => {
            let active = harness.state().plan().id.clone();
            let plans: Vec<serde_json::Value> = harness
                .library
                .plans()
                .map(|p| {
                    serde_json::json!({
                        "id": p.id,
                        "name": p.name,
                        "object_count": p.objects.len(),
                        "updated_at": p.updated_at,
                        "active": p.id == active,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({ "plans": plans }))
        }

        AgentCommand::CanPlace {
            type_id,
            grid_x,
            grid_y,
            rotation,
            exclude_id,
        } => {
            let candidate = PlacedObject {
                rotation,
                ..PlacedObject::new("", type_id, grid_x, grid_y)
            };
            let data = match harness.state().check_placement(&candidate, exclude_id.as_deref()) {
                Ok(()) => serde_json::json!({ "allowed": true }),
                Err(r) => serde_json::json!({ "allowed": false, "reason": r.code() }),
            };
            CommandResponse::ok_with_data(data)
        }

        AgentCommand::Inspect => {
            let state = harness.state();
            let objects: Vec<serde_json::Value> = state
                .objects()
                .iter()
                .map(|o| {
                    serde_json::json!({
                        "id": o.id,
                        "name": object_display_name(o, state.catalog()),
                        "type_id": o.type_id,
                        "grid_x": o.grid_x,
                        "grid_y": o.grid_y,
                        "rotation": o.rotation,
                        "level": o.level,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "plan": state.plan().name,
                "grid_width": state.plan().grid_width,
                "grid_height": state.plan().grid_height,
                "objects": objects,
                "selected": harness.selected().map(|o| o.id.clone()),
                "can_undo": state.can_undo(),
                "can_redo": state.can_redo(),
            }))
        }

        AgentCommand::Stats => match serde_json::to_value(harness.stats()) {
            Ok(data) => CommandResponse::ok_with_data(data),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::ExportPlan => match serde_json::to_value(harness.state().plan()) {
            Ok(data) => CommandResponse::ok_with_data(data),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::ImportPlan { plan } => {
            let imported = serde_json::from_value(plan)
                .map_err(LibraryError::from)
                .and_then(|plan| harness.library.import_plan(plan));
            match imported {
                Ok(id) => {
                    harness.clear_selection();
                    CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
                }
                Err(e) => CommandResponse::library_err(&e),
            }
        }
    }
}

/// Parse and execute one command.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute an array of commands in order.
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<AgentCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
