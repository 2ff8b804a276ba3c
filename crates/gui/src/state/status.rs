//! Derived UI status: which controls are enabled and the info line

use serde::Serialize;

use super::{EditorState, Mode, Tool, ToolKind};
use crate::error::EditorError;
use crate::i18n::{t, tf};

/// Enablement of toolbar buttons and side-panel inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolAvailability {
    pub select: bool,
    pub add: bool,
    #[serde(rename = "move")]
    pub move_: bool,
    pub rotate: bool,
    pub duplicate: bool,
    pub delete: bool,
    /// Element type, joint, course selector and course creation
    pub settings_inputs: bool,
    pub custom_inputs: bool,
}

impl ToolAvailability {
    pub fn allows(&self, kind: ToolKind) -> bool {
        match kind {
            ToolKind::Select => self.select,
            ToolKind::Add => self.add,
            ToolKind::Move => self.move_,
            ToolKind::Rotate => self.rotate,
            ToolKind::Duplicate => self.duplicate,
            ToolKind::Delete => self.delete,
        }
    }
}

impl EditorState {
    pub fn tool_availability(&self) -> ToolAvailability {
        let has_selection = self.selection.has_selection();
        let positioning = self.mode().is_positioning();
        let on_selection = has_selection && !positioning;
        let inputs = !(positioning || (self.tool == Tool::Duplicate && has_selection));
        let custom = inputs && !(self.tool == Tool::Add && !self.type_choice.is_custom());

        ToolAvailability {
            select: !positioning,
            add: !positioning,
            move_: on_selection,
            rotate: on_selection,
            duplicate: on_selection,
            delete: on_selection,
            settings_inputs: inputs,
            custom_inputs: custom,
        }
    }

    /// Settings inputs are locked while placing, moving or duplicating
    pub(super) fn inputs_locked(&self) -> bool {
        !self.tool_availability().settings_inputs
    }

    /// One-line description of the current mode for the status bar
    pub fn info_text(&self) -> String {
        let selected = self.selection.selected();
        let selected_name = || match self.type_for_selected() {
            Ok(def) => def.name,
            Err(_) => format!("ID {}", selected.map(|id| id.to_string()).unwrap_or_default()),
        };
        let course = self.course_info();

        match self.mode() {
            Mode::Select => {
                let mut text = match selected {
                    Some(id) => tf("info.selected", &[&id.to_string()]),
                    None => t("info.select").to_string(),
                };
                text.push_str(t("info.select_hint"));
                text
            }
            Mode::AddIdle | Mode::AddPositioning => {
                let name = self
                    .type_for_add()
                    .map(|def| def.name)
                    .unwrap_or_else(|_| t("info.invalid").to_string());
                let key = if self.mode() == Mode::AddPositioning {
                    "info.add_positioning"
                } else {
                    "info.add_idle"
                };
                tf(key, &[&name]) + &course
            }
            Mode::MovePositioning => tf("info.move_positioning", &[&selected_name()]) + &course,
            Mode::MoveIdle => match selected {
                Some(id) => tf("info.move_ready", &[&id.to_string()]),
                None => t("info.move_idle").to_string(),
            },
            Mode::Duplicate => match selected {
                Some(_) => tf("info.duplicate", &[&selected_name()]) + &course,
                None => t("info.duplicate_idle").to_string() + &course,
            },
        }
    }

    fn course_info(&self) -> String {
        match self.courses.active_course() {
            Some(c) => tf("info.course", &[&c.label()]),
            None => String::new(),
        }
    }
}

/// Localized notification text for a user-visible error
pub fn describe_error(err: &EditorError) -> String {
    match err {
        EditorError::NoSurface => t("notify.no_surface").to_string(),
        EditorError::InvalidInput(msg) => tf("notify.invalid_input", &[msg]),
        EditorError::InvalidHeight(_) => t("notify.invalid_height").to_string(),
        EditorError::InvalidType(msg) => tf("notify.invalid_type", &[msg]),
        EditorError::DuplicateCourse(h) => tf("notify.duplicate_course", &[&format!("{h:.1}")]),
        EditorError::Io(msg) => tf("notify.io", &[msg]),
        other => other.to_string(),
    }
}
