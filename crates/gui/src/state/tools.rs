//! Tool switching and selection-driven actions

use glam::DVec3;
use shared::ElementId;

use super::{ContextAction, ContextMenu, EditorState, Mode, MoveOrigin, SubState, Tool, ToolKind};
use crate::error::{EditorError, EditorResult};

impl EditorState {
    /// Activate a toolbar tool.
    ///
    /// Re-activating the current tool is a no-op except for select. Rotate
    /// and delete act on the selection and leave the current tool as is.
    /// Rotate skips the toolbar availability gating and also turns an
    /// element that is being moved.
    pub fn set_active_tool(&mut self, kind: ToolKind) -> EditorResult<()> {
        if let Some(tool) = kind.as_tool() {
            if tool == self.tool && tool != Tool::Select {
                return Ok(());
            }
        }
        if kind == ToolKind::Rotate {
            return self.rotate_selected().map(|_| ());
        }

        tracing::info!("Activating tool {:?} (current {:?})", kind, self.tool);
        self.abort_in_flight();
        self.close_context_menu();

        match kind.as_tool() {
            Some(tool) => {
                self.switch_tool(tool);
                Ok(())
            }
            None => {
                self.touch();
                let id = self.require_selection("delete")?;
                self.delete_element(id)
            }
        }
    }

    /// Toolbar button or shortcut: move and duplicate start their flow on
    /// the selection, the others go through `set_active_tool`.
    pub fn toolbar_action(&mut self, kind: ToolKind) -> EditorResult<()> {
        match kind {
            ToolKind::Move => self.trigger_move(),
            ToolKind::Duplicate => self.trigger_duplicate(),
            other => self.set_active_tool(other),
        }
    }

    /// Start moving the selected element: it is hidden and the ghost takes
    /// its place.
    pub fn trigger_move(&mut self) -> EditorResult<()> {
        let id = self.require_selection("move")?;
        if self.mode().is_positioning() {
            return Err(EditorError::InvalidState("move: already positioning".into()));
        }
        let def = self.type_for_element(id)?;
        let transform = self
            .elements
            .get(id)
            .map(|e| e.transform)
            .ok_or_else(|| EditorError::NotFound(format!("element {}", id)))?;

        self.set_active_tool(ToolKind::Move)?;
        self.move_state = SubState::Positioning;
        self.move_origin = Some(MoveOrigin { id, transform });
        self.hidden = Some(id);
        let color = def.color;
        self.ghost.show(
            def,
            color,
            DVec3::from_array(transform.position),
            transform.rotation_y,
        );
        tracing::info!("Moving element {}", id);
        self.touch();
        Ok(())
    }

    /// Enter duplicate mode with the ghost next to the selected element
    pub fn trigger_duplicate(&mut self) -> EditorResult<()> {
        let id = self.require_selection("duplicate")?;
        if self.mode().is_positioning() {
            return Err(EditorError::InvalidState("duplicate: already positioning".into()));
        }
        self.type_for_element(id)?;
        self.set_active_tool(ToolKind::Duplicate)?;
        self.seed_duplicate_ghost()?;
        tracing::info!("Duplicating element {}", id);
        self.touch();
        Ok(())
    }

    /// Select an element. Selecting another element first deselects the
    /// current one, which cancels a move in flight.
    pub fn select_element(&mut self, id: ElementId) -> EditorResult<()> {
        if !self.elements.contains(id) {
            return Err(EditorError::NotFound(format!("element {}", id)));
        }
        self.close_context_menu();
        if self.selection.is_selected(id) {
            return Ok(());
        }
        self.deselect();
        self.selection.select(id);
        tracing::debug!("Selected element {}", id);
        if self.tool == Tool::Duplicate {
            if let Err(e) = self.seed_duplicate_ghost() {
                tracing::warn!("Cannot preview duplicate of {}: {}", id, e);
            }
        }
        self.touch();
        Ok(())
    }

    /// Clear the selection. A move in flight is cancelled and the tool
    /// returns to select.
    pub fn deselect(&mut self) {
        self.close_context_menu();
        let was_moving = self.mode() == Mode::MovePositioning;
        if was_moving {
            tracing::info!("Move cancelled by deselection");
            self.restore_move_origin();
        }
        self.selection.clear();
        if was_moving {
            self.switch_tool(Tool::Select);
        }
        self.sync_ghost();
        self.touch();
    }

    /// Rotate the selected element by the rotation increment; a ghost that
    /// mirrors it follows.
    pub fn rotate_selected(&mut self) -> EditorResult<f64> {
        let id = self.require_selection("rotate")?;
        let angle = self
            .elements
            .rotate(id, self.settings.placement.rotation_increment)?;
        if self.ghost.is_visible() && matches!(self.tool, Tool::Move | Tool::Duplicate) {
            self.ghost.set_rotation_y(angle);
        }
        tracing::info!("Rotated element {} to {:.0} deg", id, angle.to_degrees());
        self.touch();
        Ok(angle)
    }

    pub fn delete_selected(&mut self) -> EditorResult<()> {
        let id = self.require_selection("delete")?;
        self.delete_element(id)
    }

    /// Remove an element. Work in flight is cancelled first; the current
    /// tool is kept.
    pub fn delete_element(&mut self, id: ElementId) -> EditorResult<()> {
        if !self.elements.contains(id) {
            return Err(EditorError::NotFound(format!("element {}", id)));
        }
        self.abort_in_flight();
        self.elements.remove(id)?;
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        if self.hidden == Some(id) {
            self.hidden = None;
        }
        self.close_context_menu();
        self.sync_ghost();
        tracing::info!("Deleted element {} ({} left)", id, self.elements.len());
        self.touch();
        Ok(())
    }

    // ── Context menu ────────────────────────────────────────

    /// Open the element menu (long press with the select tool)
    pub fn open_context_menu(&mut self, id: ElementId, anchor: [f32; 2]) -> EditorResult<()> {
        if self.tool != Tool::Select {
            return Err(EditorError::InvalidState(
                "context menu: only available with the select tool".into(),
            ));
        }
        self.select_element(id)?;
        self.context_menu = Some(ContextMenu { target: id, anchor });
        tracing::debug!("Context menu opened for element {}", id);
        self.touch();
        Ok(())
    }

    pub fn close_context_menu(&mut self) {
        if self.context_menu.take().is_some() {
            self.touch();
        }
    }

    /// Run a context menu entry against its target, then close the menu
    pub fn context_menu_action(&mut self, action: ContextAction) -> EditorResult<()> {
        let menu = self
            .context_menu
            .ok_or_else(|| EditorError::InvalidState("no context menu open".into()))?;
        if !self.selection.is_selected(menu.target) {
            self.select_element(menu.target)?;
        }
        tracing::debug!("Context menu action {:?} on element {}", action, menu.target);
        let result = match action {
            ContextAction::Rotate => self.rotate_selected().map(|_| ()),
            ContextAction::Move => self.trigger_move(),
            ContextAction::Duplicate => self.trigger_duplicate(),
            ContextAction::Delete => self.delete_selected(),
        };
        self.close_context_menu();
        result
    }

    // ── Internals ───────────────────────────────────────────

    /// Set the persistent tool after in-flight work has been settled
    pub(super) fn switch_tool(&mut self, tool: Tool) {
        self.add_state = SubState::Idle;
        self.move_state = SubState::Idle;
        self.tool = tool;
        if tool == Tool::Add {
            self.selection.clear();
        }
        self.ghost.hide();
        if tool == Tool::Duplicate && self.selection.has_selection() {
            if let Err(e) = self.seed_duplicate_ghost() {
                tracing::warn!("Cannot preview duplicate: {}", e);
            }
        }
        self.touch();
    }

    /// Cancel an add or move in progress and reset both sub-states
    pub(super) fn abort_in_flight(&mut self) {
        match self.mode() {
            Mode::AddPositioning => {
                tracing::info!("Add placement cancelled");
                self.ghost.hide();
            }
            Mode::MovePositioning => {
                tracing::info!("Move cancelled");
                self.restore_move_origin();
            }
            _ => {}
        }
        self.add_state = SubState::Idle;
        self.move_state = SubState::Idle;
        self.move_origin = None;
    }

    /// Put the moved element back where it was and show it again
    pub(super) fn restore_move_origin(&mut self) {
        if let Some(origin) = self.move_origin.take() {
            if let Err(e) = self.elements.set_transform(origin.id, origin.transform) {
                tracing::warn!("Cannot restore moved element: {}", e);
            }
        }
        self.hidden = None;
        self.move_state = SubState::Idle;
        self.ghost.hide();
    }

    /// Place the ghost at the selection's pose, offset on X
    fn seed_duplicate_ghost(&mut self) -> EditorResult<()> {
        let id = self.require_selection("duplicate")?;
        let def = self.type_for_element(id)?;
        let transform = self
            .elements
            .get(id)
            .map(|e| e.transform)
            .ok_or_else(|| EditorError::NotFound(format!("element {}", id)))?;
        let position = DVec3::from_array(transform.position)
            + DVec3::X * self.settings.placement.duplicate_offset_cm;
        let color = def.color;
        self.ghost.show(def, color, position, transform.rotation_y);
        Ok(())
    }

    /// Hide the ghost when the current mode does not allow it
    pub(super) fn sync_ghost(&mut self) {
        let allowed = match self.mode() {
            Mode::AddPositioning | Mode::MovePositioning => true,
            Mode::Duplicate => self.selection.has_selection(),
            _ => false,
        };
        if !allowed {
            self.ghost.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorState;
    use shared::Transform;

    fn state_with_brick() -> (EditorState, ElementId) {
        let mut state = EditorState::default();
        let def = state.catalog().get("M50").unwrap().to_type_def();
        let id = state
            .elements
            .place(&def, [10.0, 3.7, 20.0], 0.0, &state.catalog, None)
            .unwrap();
        (state, id)
    }

    #[test]
    fn test_reactivating_same_tool_is_noop() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        let v = state.version();
        state.set_active_tool(ToolKind::Add).unwrap();
        assert_eq!(state.version(), v);
    }

    #[test]
    fn test_add_clears_selection_and_disables_navigation() {
        let (mut state, id) = state_with_brick();
        state.select_element(id).unwrap();
        state.set_active_tool(ToolKind::Add).unwrap();
        assert_eq!(state.selection(), None);
        assert!(!state.navigation_enabled());
    }

    #[test]
    fn test_move_cancel_by_tool_switch_restores_pose() {
        let (mut state, id) = state_with_brick();
        state.select_element(id).unwrap();
        state.trigger_move().unwrap();
        assert_eq!(state.mode(), Mode::MovePositioning);
        assert_eq!(state.hidden_element(), Some(id));

        state.elements.set_transform(id, Transform::new([0.0; 3], 1.0)).unwrap();
        state.set_active_tool(ToolKind::Select).unwrap();
        assert_eq!(
            state.element(id).unwrap().transform,
            Transform::new([10.0, 3.7, 20.0], 0.0)
        );
        assert_eq!(state.hidden_element(), None);
        assert!(!state.ghost().is_visible());
        assert_eq!(state.selection(), Some(id));
    }

    #[test]
    fn test_duplicate_seeds_offset_ghost() {
        let (mut state, id) = state_with_brick();
        state.select_element(id).unwrap();
        state.trigger_duplicate().unwrap();
        assert_eq!(state.mode(), Mode::Duplicate);
        assert!(state.ghost().is_visible());
        assert_eq!(state.ghost().position(), DVec3::new(20.0, 3.7, 20.0));
        assert_eq!(state.hidden_element(), None);
    }

    #[test]
    fn test_rotate_keeps_tool_and_needs_selection() {
        let (mut state, id) = state_with_brick();
        assert!(matches!(
            state.set_active_tool(ToolKind::Rotate),
            Err(EditorError::InvalidState(_))
        ));
        state.select_element(id).unwrap();
        state.set_active_tool(ToolKind::Rotate).unwrap();
        assert_eq!(state.tool(), Tool::Select);
        let r = state.element(id).unwrap().transform.rotation_y;
        assert!((r - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_delete_tool_keeps_tool() {
        let (mut state, id) = state_with_brick();
        state.select_element(id).unwrap();
        state.set_active_tool(ToolKind::Delete).unwrap();
        assert_eq!(state.tool(), Tool::Select);
        assert_eq!(state.element_count(), 0);
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_delete_during_duplicate_hides_ghost() {
        let (mut state, id) = state_with_brick();
        state.select_element(id).unwrap();
        state.trigger_duplicate().unwrap();
        state.delete_element(id).unwrap();
        assert_eq!(state.tool(), Tool::Duplicate);
        assert!(!state.ghost().is_visible());
    }

    #[test]
    fn test_deselect_during_move_returns_to_select() {
        let (mut state, id) = state_with_brick();
        state.select_element(id).unwrap();
        state.trigger_move().unwrap();
        state.deselect();
        assert_eq!(state.mode(), Mode::Select);
        assert_eq!(state.selection(), None);
        assert_eq!(state.hidden_element(), None);
    }

    #[test]
    fn test_context_menu_actions() {
        let (mut state, id) = state_with_brick();
        state.open_context_menu(id, [100.0, 80.0]).unwrap();
        assert_eq!(state.selection(), Some(id));
        assert_eq!(state.context_menu().map(|m| m.target), Some(id));

        state.context_menu_action(ContextAction::Move).unwrap();
        assert!(state.context_menu().is_none());
        assert_eq!(state.mode(), Mode::MovePositioning);
    }

    #[test]
    fn test_context_menu_only_in_select() {
        let (mut state, id) = state_with_brick();
        state.set_active_tool(ToolKind::Add).unwrap();
        assert!(state.open_context_menu(id, [0.0, 0.0]).is_err());
        assert!(state.context_menu_action(ContextAction::Delete).is_err());
    }
}
