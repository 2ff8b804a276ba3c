//! Tool modes and their sub-states

use serde::{Deserialize, Serialize};

/// Persistent tool mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Select,
    Add,
    Move,
    Duplicate,
}

/// Anything the toolbar can activate, including the instantaneous actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Select,
    Add,
    Move,
    Duplicate,
    Rotate,
    Delete,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Add,
        ToolKind::Move,
        ToolKind::Rotate,
        ToolKind::Duplicate,
        ToolKind::Delete,
    ];

    /// Persistent mode this kind switches to; `None` for rotate/delete
    pub fn as_tool(self) -> Option<Tool> {
        match self {
            ToolKind::Select => Some(Tool::Select),
            ToolKind::Add => Some(Tool::Add),
            ToolKind::Move => Some(Tool::Move),
            ToolKind::Duplicate => Some(Tool::Duplicate),
            ToolKind::Rotate | ToolKind::Delete => None,
        }
    }
}

impl From<Tool> for ToolKind {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::Select => ToolKind::Select,
            Tool::Add => ToolKind::Add,
            Tool::Move => ToolKind::Move,
            Tool::Duplicate => ToolKind::Duplicate,
        }
    }
}

/// Sub-state of the add and move tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubState {
    #[default]
    Idle,
    Positioning,
}

/// Flattened view of tool + sub-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Select,
    AddIdle,
    AddPositioning,
    MoveIdle,
    MovePositioning,
    Duplicate,
}

impl Mode {
    pub fn from_parts(tool: Tool, add: SubState, mv: SubState) -> Self {
        match (tool, add, mv) {
            (Tool::Select, _, _) => Mode::Select,
            (Tool::Add, SubState::Idle, _) => Mode::AddIdle,
            (Tool::Add, SubState::Positioning, _) => Mode::AddPositioning,
            (Tool::Move, _, SubState::Idle) => Mode::MoveIdle,
            (Tool::Move, _, SubState::Positioning) => Mode::MovePositioning,
            (Tool::Duplicate, _, _) => Mode::Duplicate,
        }
    }

    /// Ghost is being adjusted with DPad/keys
    pub fn is_positioning(self) -> bool {
        matches!(self, Mode::AddPositioning | Mode::MovePositioning)
    }
}
