//! JSON command protocol for scripted sessions and agents.

use serde::{Deserialize, Serialize};
use shared::ElementId;

use crate::harness::TestHarness;
use crate::input::EditorKey;
use crate::state::ToolKind;

/// A command executed against the editor
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Toolbar button
    SetTool { tool: ToolKind },
    /// Click the ground at (x, z)
    ClickGround { x: f64, z: f64 },
    /// Click straight down over (x, z), hitting elements first
    ClickAt { x: f64, z: f64 },
    /// Click the top face of an element
    ClickElement { id: ElementId },
    /// Hover the ground at (x, z)
    HoverGround { x: f64, z: f64 },
    /// Move the ghost by DPad steps
    Nudge {
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dz: i32,
    },
    /// One course up
    Raise,
    /// One course down
    Lower,
    /// Rotate the ghost by one increment (`direction` -1 or 1)
    RotateGhost {
        #[serde(default = "default_direction")]
        direction: i32,
    },
    Confirm,
    Cancel,
    Key { key: EditorKey },
    Select { id: ElementId },
    Deselect,
    Move,
    Duplicate,
    Rotate,
    Delete,
    /// Course from the current add type
    CreateCourse,
    SelectCourse { id: String },
    SetJoint { value: f64 },
    /// Catalog id or "CUSTOM"
    ChooseType { id: String },
    /// Custom element inputs; omitted fields are kept
    SetCustom {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        width: Option<String>,
        #[serde(default)]
        height: Option<String>,
        #[serde(default)]
        depth: Option<String>,
    },
    /// Editor summary: mode, elements, ghost, courses
    Inspect,
    /// Layout document as JSON
    ExportLayout,
    /// Replace the layout from a JSON document
    LoadLayout { json: String },
    /// Empty layout
    NewLayout,
}

fn default_direction() -> i32 {
    1
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
}

impl<T> From<crate::error::EditorResult<T>> for CommandResponse {
    fn from(result: crate::error::EditorResult<T>) -> Self {
        match result {
            Ok(_) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e.to_string()),
        }
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: AgentCommand) -> CommandResponse {
    tracing::debug!("Executing {:?}", cmd);
    let state = &mut harness.state;
    match cmd {
        AgentCommand::SetTool { tool } => state.set_active_tool(tool).into(),

        AgentCommand::ClickGround { x, z } => click_response(harness.click_ground(x, z)),
        AgentCommand::ClickAt { x, z } => click_response(harness.click_at(x, z)),
        AgentCommand::ClickElement { id } => click_response(harness.click_element(id)),

        AgentCommand::HoverGround { x, z } => {
            let moved = harness.hover_ground(x, z);
            CommandResponse::ok_with_data(serde_json::json!({ "ghost_moved": moved }))
        }

        AgentCommand::Nudge { dx, dz } => state.nudge_ghost_steps(dx, dz).into(),
        AgentCommand::Raise => state.step_ghost_vertical(1).into(),
        AgentCommand::Lower => state.step_ghost_vertical(-1).into(),
        AgentCommand::RotateGhost { direction } => state.rotate_ghost_step(direction).into(),

        AgentCommand::Confirm => match state.confirm() {
            Ok(placed) => CommandResponse::ok_with_data(serde_json::json!({ "placed": placed })),
            Err(e) => CommandResponse::err(e.to_string()),
        },
        AgentCommand::Cancel => state.cancel().into(),

        AgentCommand::Key { key } => match state.handle_key(key) {
            Ok(handled) => CommandResponse::ok_with_data(serde_json::json!({ "handled": handled })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::Select { id } => state.select_element(id).into(),
        AgentCommand::Deselect => {
            state.deselect();
            CommandResponse::ok()
        }
        AgentCommand::Move => state.trigger_move().into(),
        AgentCommand::Duplicate => state.trigger_duplicate().into(),
        AgentCommand::Rotate => match state.rotate_selected() {
            Ok(angle) => CommandResponse::ok_with_data(serde_json::json!({ "rotation_y": angle })),
            Err(e) => CommandResponse::err(e.to_string()),
        },
        AgentCommand::Delete => state.delete_selected().into(),

        AgentCommand::CreateCourse => match state.create_course() {
            Ok(id) => CommandResponse::ok_with_data(serde_json::json!({
                "id": id,
                "height": state.courses().active_height(),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },
        AgentCommand::SelectCourse { id } => state.select_course(&id).into(),
        AgentCommand::SetJoint { value } => state.set_joint_thickness(value).into(),
        AgentCommand::ChooseType { id } => state.choose_type(&id).into(),

        AgentCommand::SetCustom {
            name,
            width,
            height,
            depth,
        } => {
            let inputs = state.custom_inputs_mut();
            if let Some(v) = name {
                inputs.name = v;
            }
            if let Some(v) = width {
                inputs.width = v;
            }
            if let Some(v) = height {
                inputs.height = v;
            }
            if let Some(v) = depth {
                inputs.depth = v;
            }
            match inputs.to_type_def() {
                Ok(def) => CommandResponse::ok_with_data(serde_json::json!({
                    "name": def.name,
                    "dimensions": def.dimensions.to_array(),
                })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        AgentCommand::Inspect => CommandResponse::ok_with_data(inspect(harness)),

        AgentCommand::ExportLayout => {
            let json = harness.export_layout_json();
            CommandResponse::ok_with_data(serde_json::json!({ "layout_json": json }))
        }

        AgentCommand::LoadLayout { json } => match harness.load_layout_json(&json) {
            Ok(count) => CommandResponse::ok_with_data(serde_json::json!({ "element_count": count })),
            Err(e) => CommandResponse::err(e),
        },

        AgentCommand::NewLayout => {
            state.new_layout();
            CommandResponse::ok()
        }
    }
}

fn click_response(
    result: crate::error::EditorResult<crate::state::ClickOutcome>,
) -> CommandResponse {
    match result {
        Ok(outcome) => CommandResponse::ok_with_data(serde_json::json!({
            "outcome": format!("{:?}", outcome),
        })),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

fn inspect(harness: &TestHarness) -> serde_json::Value {
    let state = &harness.state;
    let elements: Vec<serde_json::Value> = state
        .elements()
        .iter()
        .map(|e| {
            serde_json::json!({
                "id": e.id,
                "type_id": e.kind.type_id(),
                "position": e.transform.position,
                "rotation_y": e.transform.rotation_y,
            })
        })
        .collect();
    let ghost = harness.ghost_position().map(|p| p.to_array());
    serde_json::json!({
        "mode": state.mode(),
        "element_count": elements.len(),
        "elements": elements,
        "selection": state.selection(),
        "ghost": ghost,
        "joint_thickness": state.joint_thickness(),
        "active_course": state.courses().active_id(),
        "course_height": state.courses().active_height(),
        "availability": state.tool_availability(),
        "info": state.info_text(),
    })
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_set_tool() {
        let json = r#"{"command": "set_tool", "tool": "duplicate"}"#;
        let cmd: AgentCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, AgentCommand::SetTool { tool: ToolKind::Duplicate }));
    }

    #[test]
    fn test_command_serde_defaults() {
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "nudge", "dx": 2}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::Nudge { dx: 2, dz: 0 }));
        let cmd: AgentCommand = serde_json::from_str(r#"{"command": "rotate_ghost"}"#).unwrap();
        assert!(matches!(cmd, AgentCommand::RotateGhost { direction: 1 }));
    }

    #[test]
    fn test_execute_place_flow() {
        let mut h = TestHarness::new();
        let responses = execute_json_batch(
            &mut h,
            r#"[
                {"command": "set_tool", "tool": "add"},
                {"command": "click_ground", "x": 5.0, "z": 3.0},
                {"command": "confirm"},
                {"command": "inspect"}
            ]"#,
        )
        .unwrap();
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(responses[2].data.as_ref().unwrap()["placed"], 0);
        let data = responses[3].data.as_ref().unwrap();
        assert_eq!(data["element_count"], 1);
        assert_eq!(data["mode"], "add_idle");
    }

    #[test]
    fn test_execute_errors_are_reported() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "confirm"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.error.unwrap().contains("nothing to confirm"));

        let resp = execute_json(&mut h, r#"{"command": "set_joint", "value": -1}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_execute_set_custom() {
        let mut h = TestHarness::new();
        let resp = execute_json(
            &mut h,
            r#"{"command": "set_custom", "name": "Linteau", "width": "2*50"}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["dimensions"][0], 100.0);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
