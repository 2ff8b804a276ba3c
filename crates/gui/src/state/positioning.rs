//! Ghost adjustment and commit/cancel of add and move

use glam::DVec3;
use shared::ElementId;

use super::{EditorState, Mode, SubState, Tool};
use crate::error::{EditorError, EditorResult};
use crate::snapping::snap_vertical;

impl EditorState {
    fn require_positioning(&self, action: &str) -> EditorResult<()> {
        if self.mode().is_positioning() && self.ghost.is_visible() {
            Ok(())
        } else {
            Err(EditorError::InvalidState(format!(
                "{}: nothing is being positioned",
                action
            )))
        }
    }

    /// Free translation of the ghost (not re-snapped)
    pub fn nudge_ghost(&mut self, dx: f64, dy: f64, dz: f64) -> EditorResult<()> {
        self.require_positioning("nudge")?;
        let position = self.ghost.position() + DVec3::new(dx, dy, dz);
        self.ghost.set_position(position);
        self.touch();
        Ok(())
    }

    /// Nudge by whole DPad steps along X/Z
    pub fn nudge_ghost_steps(&mut self, steps_x: i32, steps_z: i32) -> EditorResult<()> {
        let inc = self.settings.placement.dpad_increment_cm;
        self.nudge_ghost(steps_x as f64 * inc, 0.0, steps_z as f64 * inc)
    }

    /// Raise (`direction > 0`) or lower the ghost by one course height, or
    /// by the DPad increment in free placement.
    pub fn step_ghost_vertical(&mut self, direction: i32) -> EditorResult<()> {
        self.require_positioning("vertical step")?;
        let height = self
            .ghost
            .dimensions()
            .map(|d| d.height)
            .ok_or_else(|| EditorError::InvalidType("ghost has no dimensions".into()))?;

        let course = self.courses.active_height();
        let increment = match course {
            Some(c) if c > 0.0 => c,
            _ => self.settings.placement.dpad_increment_cm,
        };
        let bottom = self.ghost.position().y - height / 2.0;
        let target = (bottom + direction.signum() as f64 * increment).max(0.0);
        let snapped = snap_vertical(target, height, course);

        let mut position = self.ghost.position();
        position.y = snapped + height / 2.0;
        self.ghost.set_position(position);
        tracing::debug!(
            "Vertical step {:+}: increment {:.1}, center y {:.1}",
            direction.signum(),
            increment,
            position.y
        );
        self.touch();
        Ok(())
    }

    /// Rotate the ghost around Y
    pub fn rotate_ghost(&mut self, angle: f64) -> EditorResult<()> {
        self.require_positioning("rotate ghost")?;
        let rotation = self.ghost.rotation_y() + angle;
        self.ghost.set_rotation_y(rotation);
        self.touch();
        Ok(())
    }

    /// Rotate the ghost by one rotation increment (`direction` -1 or 1)
    pub fn rotate_ghost_step(&mut self, direction: i32) -> EditorResult<()> {
        let inc = self.settings.placement.rotation_increment;
        self.rotate_ghost(direction.signum() as f64 * inc)
    }

    /// Confirm whichever placement is in progress
    pub fn confirm(&mut self) -> EditorResult<Option<ElementId>> {
        match self.mode() {
            Mode::AddPositioning => self.confirm_add().map(Some),
            Mode::MovePositioning => self.confirm_move().map(|_| None),
            _ => Err(EditorError::InvalidState("confirm: nothing to confirm".into())),
        }
    }

    /// Cancel whichever placement is in progress
    pub fn cancel(&mut self) -> EditorResult<()> {
        match self.mode() {
            Mode::AddPositioning => self.cancel_add(),
            Mode::MovePositioning => self.cancel_move(),
            _ => Err(EditorError::InvalidState("cancel: nothing to cancel".into())),
        }
    }

    /// Commit a new element at the ghost pose; the add tool stays active
    pub fn confirm_add(&mut self) -> EditorResult<ElementId> {
        if self.mode() != Mode::AddPositioning {
            return Err(EditorError::InvalidState("confirm add: not positioning".into()));
        }
        self.require_positioning("confirm add")?;
        let def = self
            .ghost
            .def()
            .cloned()
            .ok_or_else(|| EditorError::InvalidType("ghost has no element type".into()))?;
        let transform = self.ghost.transform();

        let placed = self.elements.place(
            &def,
            transform.position,
            transform.rotation_y,
            &self.catalog,
            self.type_choice.catalog_id(),
        );
        self.add_state = SubState::Idle;
        self.ghost.hide();
        self.touch();

        match placed {
            Ok(id) => {
                tracing::info!(
                    "Placed {} as element {} ({} total)",
                    def.name,
                    id,
                    self.elements.len()
                );
                Ok(id)
            }
            Err(e) => {
                tracing::error!("Placement failed: {}", e);
                Err(e)
            }
        }
    }

    /// Discard the ghost and go back to waiting for a first click
    pub fn cancel_add(&mut self) -> EditorResult<()> {
        if self.mode() != Mode::AddPositioning {
            return Err(EditorError::InvalidState("cancel add: not positioning".into()));
        }
        tracing::info!("Add placement cancelled");
        self.add_state = SubState::Idle;
        self.ghost.hide();
        self.touch();
        Ok(())
    }

    /// Apply the ghost pose to the moved element and return to select
    pub fn confirm_move(&mut self) -> EditorResult<()> {
        if self.mode() != Mode::MovePositioning {
            return Err(EditorError::InvalidState("confirm move: not moving".into()));
        }
        self.require_positioning("confirm move")?;
        let origin = self
            .move_origin
            .ok_or_else(|| EditorError::InvalidState("confirm move: no move origin".into()))?;

        self.elements.set_transform(origin.id, self.ghost.transform())?;
        tracing::info!("Moved element {} to {:?}", origin.id, self.ghost.position());
        self.move_origin = None;
        self.hidden = None;
        self.switch_tool(Tool::Select);
        Ok(())
    }

    /// Put the element back where it was and return to select
    pub fn cancel_move(&mut self) -> EditorResult<()> {
        if self.mode() != Mode::MovePositioning {
            return Err(EditorError::InvalidState("cancel move: not moving".into()));
        }
        tracing::info!("Move cancelled");
        self.restore_move_origin();
        self.switch_tool(Tool::Select);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToolKind;
    use crate::viewport::picking::Intersection;
    use shared::Transform;

    const EPS: f64 = 1e-9;

    fn positioning_state() -> EditorState {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(5.0, 3.0)]).unwrap();
        assert_eq!(state.mode(), Mode::AddPositioning);
        state
    }

    #[test]
    fn test_nudge_is_not_snapped() {
        let mut state = positioning_state();
        let before = state.ghost().position();
        state.nudge_ghost_steps(1, -1).unwrap();
        let after = state.ghost().position();
        assert!((after.x - before.x - 1.0).abs() < EPS);
        assert!((after.z - before.z + 1.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_step_free_and_floor() {
        let mut state = positioning_state();
        // M50 is 5 high: ground click puts its bottom at the joint (1.2)
        let h = 5.0;
        let bottom = state.ghost().bottom_y().unwrap();
        assert!((bottom - 1.2).abs() < EPS);

        state.step_ghost_vertical(1).unwrap();
        assert!((state.ghost().position().y - (2.2 + h / 2.0)).abs() < EPS);

        for _ in 0..5 {
            state.step_ghost_vertical(-1).unwrap();
        }
        assert!((state.ghost().bottom_y().unwrap()).abs() < EPS);
    }

    #[test]
    fn test_vertical_step_follows_course() {
        let mut state = EditorState::default();
        state.create_course().unwrap();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        // 1.2 snaps to the 6.2 course grid -> bottom 0
        assert!(state.ghost().bottom_y().unwrap().abs() < EPS);
        state.step_ghost_vertical(1).unwrap();
        assert!((state.ghost().bottom_y().unwrap() - 6.2).abs() < EPS);
    }

    #[test]
    fn test_adjustments_outside_positioning_fail() {
        let mut state = EditorState::default();
        assert!(state.nudge_ghost(1.0, 0.0, 0.0).is_err());
        assert!(state.step_ghost_vertical(1).is_err());
        assert!(state.rotate_ghost(0.3).is_err());
        assert!(state.confirm().is_err());
        assert!(state.cancel().is_err());
    }

    #[test]
    fn test_confirm_add_keeps_add_tool() {
        let mut state = positioning_state();
        state.rotate_ghost_step(1).unwrap();
        let id = state.confirm().unwrap().unwrap();
        assert_eq!(state.mode(), Mode::AddIdle);
        assert!(!state.ghost().is_visible());
        let element = state.element(id).unwrap();
        assert_eq!(element.kind.type_id(), "M50");
        assert!((element.transform.rotation_y - std::f64::consts::FRAC_PI_4).abs() < EPS);
    }

    #[test]
    fn test_switch_to_select_discards_add() {
        let mut state = positioning_state();
        state.set_active_tool(ToolKind::Select).unwrap();
        assert_eq!(state.element_count(), 0);
        assert!(!state.ghost().is_visible());
        assert_eq!(state.mode(), Mode::Select);
    }

    #[test]
    fn test_move_confirm_and_cancel() {
        let mut state = positioning_state();
        let id = state.confirm_add().unwrap();
        let original = state.element(id).unwrap().transform;

        state.set_active_tool(ToolKind::Select).unwrap();
        state.select_element(id).unwrap();
        state.trigger_move().unwrap();
        state.nudge_ghost(3.3, 0.0, 0.0).unwrap();
        state.rotate_ghost(0.7).unwrap();
        state.cancel().unwrap();
        assert_eq!(state.element(id).unwrap().transform, original);
        assert_eq!(state.mode(), Mode::Select);
        assert_eq!(state.selection(), Some(id));

        state.trigger_move().unwrap();
        state.nudge_ghost(3.3, 0.0, 0.0).unwrap();
        state.confirm().unwrap();
        let moved = state.element(id).unwrap().transform;
        assert_eq!(
            moved,
            Transform::new(
                [original.position[0] + 3.3, original.position[1], original.position[2]],
                original.rotation_y
            )
        );
        assert_eq!(state.mode(), Mode::Select);
        assert_eq!(state.selection(), Some(id));
        assert_eq!(state.hidden_element(), None);
    }
}
