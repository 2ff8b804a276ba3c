//! Keyboard shortcuts, independent of the windowing toolkit

use serde::{Deserialize, Serialize};

use crate::error::EditorResult;
use crate::state::{EditorState, ToolKind};

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorKey {
    Escape,
    Enter,
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    /// Letter key, lowercase
    Char(char),
}

impl EditorState {
    /// Apply a key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: EditorKey) -> EditorResult<bool> {
        match key {
            EditorKey::Escape => {
                self.close_context_menu();
                if self.mode().is_positioning() {
                    self.cancel()?;
                } else if self.selection().is_some() {
                    self.deselect();
                }
                return Ok(true);
            }
            EditorKey::Enter => {
                if self.mode().is_positioning() {
                    self.confirm()?;
                }
                return Ok(true);
            }
            EditorKey::Delete | EditorKey::Backspace => {
                if self.tool_availability().delete {
                    self.delete_selected()?;
                }
                return Ok(true);
            }
            _ => {}
        }

        if self.mode().is_positioning() {
            let handled = match key {
                EditorKey::ArrowUp | EditorKey::Char('w') => self.nudge_ghost_steps(0, -1).map(|_| true),
                EditorKey::ArrowDown | EditorKey::Char('s') => self.nudge_ghost_steps(0, 1).map(|_| true),
                EditorKey::ArrowLeft | EditorKey::Char('a') => self.nudge_ghost_steps(-1, 0).map(|_| true),
                EditorKey::ArrowRight | EditorKey::Char('d') => self.nudge_ghost_steps(1, 0).map(|_| true),
                EditorKey::PageUp => self.step_ghost_vertical(1).map(|_| true),
                EditorKey::PageDown => self.step_ghost_vertical(-1).map(|_| true),
                EditorKey::Char('q') => self.rotate_ghost_step(-1).map(|_| true),
                EditorKey::Char('e') => self.rotate_ghost_step(1).map(|_| true),
                _ => Ok(false),
            }?;
            if handled {
                return Ok(true);
            }
        }

        let availability = self.tool_availability();
        let kind = match key {
            EditorKey::Char('s') => ToolKind::Select,
            EditorKey::Char('a') => ToolKind::Add,
            EditorKey::Char('m') => ToolKind::Move,
            EditorKey::Char('r') => ToolKind::Rotate,
            EditorKey::Char('d') => ToolKind::Duplicate,
            _ => return Ok(false),
        };
        if !availability.allows(kind) {
            return Ok(false);
        }
        self.toolbar_action(kind)?;
        Ok(true)
    }
}
