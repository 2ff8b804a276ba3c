//! Pointer clicks and hover, fed with ray intersections

use glam::DVec3;
use shared::{Dimensions, ElementId};

use super::{EditorState, Mode, SubState, Tool};
use crate::error::{EditorError, EditorResult};
use crate::snapping::{compute_snapped_pose, Surface, SurfaceHit};
use crate::state::ghost::ADD_GHOST_COLOR;
use crate::viewport::picking::{HitTarget, Intersection};

/// Outcome of a viewport click
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    Selected(ElementId),
    Deselected,
    /// Add tool: ghost shown, now positioning
    GhostPlaced,
    /// Duplicate committed as a new element
    Duplicated(ElementId),
    /// Duplicate mode left without placing anything
    RevertedToSelect,
    Ignored,
}

impl EditorState {
    /// Surface under an intersection; `None` for the hidden element or an
    /// element whose type no longer resolves.
    pub fn surface_hit(&self, intersection: &Intersection) -> Option<SurfaceHit> {
        match intersection.hit {
            HitTarget::Ground => Some(SurfaceHit {
                point: intersection.point,
                surface: Surface::Ground,
            }),
            HitTarget::Element(id) => {
                if self.hidden == Some(id) {
                    return None;
                }
                let def = self.type_for_element(id).ok()?;
                let element = self.elements.get(id)?;
                let top_y = element.transform.position[1] + def.dimensions.height / 2.0;
                Some(SurfaceHit {
                    point: intersection.point,
                    surface: Surface::ElementTop { top_y },
                })
            }
        }
    }

    /// Snapped center for a box of `dims` dropped on the nearest hit
    pub fn snapped_pose(&self, hits: &[Intersection], dims: &Dimensions) -> Option<DVec3> {
        let first = hits.iter().find(|h| match h.hit {
            HitTarget::Element(id) => self.hidden != Some(id),
            HitTarget::Ground => true,
        })?;
        let surface = self.surface_hit(first)?;
        compute_snapped_pose(
            &surface,
            Some(dims),
            self.joint_thickness,
            self.courses.active_height(),
        )
    }

    /// Viewport click (pointer released without drag or long press)
    pub fn handle_click(&mut self, hits: &[Intersection]) -> EditorResult<ClickOutcome> {
        match self.mode() {
            Mode::Select => {
                match hits.iter().find_map(|h| h.element_id()) {
                    Some(id) => {
                        self.select_element(id)?;
                        Ok(ClickOutcome::Selected(id))
                    }
                    None => {
                        self.deselect();
                        Ok(ClickOutcome::Deselected)
                    }
                }
            }
            Mode::AddIdle => self.begin_add(hits),
            Mode::AddPositioning => {
                tracing::debug!("Click ignored while positioning (confirm or cancel)");
                Ok(ClickOutcome::Ignored)
            }
            Mode::MoveIdle | Mode::MovePositioning => {
                tracing::debug!("Click ignored in move mode");
                Ok(ClickOutcome::Ignored)
            }
            Mode::Duplicate => self.place_duplicate(hits),
        }
    }

    /// Pointer hover: re-snaps the ghost while moving or duplicating
    pub fn handle_hover(&mut self, hits: &[Intersection]) -> bool {
        let follows = match self.mode() {
            Mode::MovePositioning => true,
            Mode::Duplicate => self.selection.has_selection() && self.ghost.is_visible(),
            _ => false,
        };
        if !follows {
            return false;
        }
        let Some(dims) = self.ghost.dimensions().copied() else {
            return false;
        };
        match self.snapped_pose(hits, &dims) {
            Some(pos) if pos != self.ghost.position() => {
                self.ghost.set_position(pos);
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// First click of the add tool: show the ghost at the snapped pose
    fn begin_add(&mut self, hits: &[Intersection]) -> EditorResult<ClickOutcome> {
        let def = self.type_for_add()?;
        let Some(position) = self.snapped_pose(hits, &def.dimensions) else {
            tracing::info!("Add click outside a valid surface");
            return Err(EditorError::NoSurface);
        };
        tracing::info!("Positioning {} at {:?}", def.name, position);
        self.ghost.show(def, ADD_GHOST_COLOR, position, 0.0);
        self.add_state = SubState::Positioning;
        self.touch();
        Ok(ClickOutcome::GhostPlaced)
    }

    /// Commit the duplicate ghost, select the copy and return to select
    fn place_duplicate(&mut self, hits: &[Intersection]) -> EditorResult<ClickOutcome> {
        if !self.selection.has_selection() || !self.ghost.is_visible() {
            self.switch_tool(Tool::Select);
            return Ok(ClickOutcome::RevertedToSelect);
        }
        if let Some(dims) = self.ghost.dimensions().copied() {
            if let Some(pos) = self.snapped_pose(hits, &dims) {
                self.ghost.set_position(pos);
            }
        }

        let def = match self.type_for_selected() {
            Ok(def) => def,
            Err(e) => {
                tracing::error!("Cannot duplicate: {}", e);
                self.switch_tool(Tool::Select);
                return Err(e);
            }
        };
        let transform = self.ghost.transform();
        let placed = self.elements.place(
            &def,
            transform.position,
            transform.rotation_y,
            &self.catalog,
            self.type_choice.catalog_id(),
        );
        let outcome = match placed {
            Ok(id) => {
                tracing::info!("Duplicated as element {}", id);
                self.selection.select(id);
                Ok(ClickOutcome::Duplicated(id))
            }
            Err(e) => Err(e),
        };
        self.switch_tool(Tool::Select);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToolKind;
    use shared::{Catalog, CatalogEntry, Rgb};

    const EPS: f64 = 1e-9;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![CatalogEntry {
            id: "T1".into(),
            name: "Bloc test".into(),
            dimensions: Dimensions::new(19.0, 9.0, 5.0),
            color: Rgb::from_hex(0x999999),
        }])
    }

    #[test]
    fn test_add_click_end_to_end() {
        let mut state = EditorState::with_catalog(Default::default(), test_catalog());
        state.set_active_tool(ToolKind::Add).unwrap();
        let outcome = state.handle_click(&[Intersection::ground(5.0, 3.0)]).unwrap();
        assert_eq!(outcome, ClickOutcome::GhostPlaced);
        let g = state.ghost().position();
        assert!((g.x - 4.8).abs() < EPS);
        assert!((g.y - 5.7).abs() < EPS);
        assert!((g.z - 3.6).abs() < EPS);

        let id = state.confirm().unwrap().unwrap();
        assert_eq!(state.element_count(), 1);
        let pos = state.element(id).unwrap().transform.position;
        assert!((pos[0] - 4.8).abs() < EPS && (pos[1] - 5.7).abs() < EPS && (pos[2] - 3.6).abs() < EPS);
        assert_eq!(state.element(id).unwrap().kind.type_id(), "T1");
    }

    #[test]
    fn test_add_click_without_surface() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        assert_eq!(state.handle_click(&[]), Err(EditorError::NoSurface));
        assert_eq!(state.mode(), Mode::AddIdle);
        assert!(!state.ghost().is_visible());
    }

    #[test]
    fn test_click_while_positioning_is_ignored() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        let before = state.ghost().position();
        let outcome = state.handle_click(&[Intersection::ground(50.0, 50.0)]).unwrap();
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(state.ghost().position(), before);
    }

    #[test]
    fn test_stacking_on_element() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        let below = state.confirm_add().unwrap();

        let top = state.element(below).unwrap().transform.position[1] + 2.5;
        state
            .handle_click(&[Intersection::element(below, DVec3::new(0.0, top, 0.0))])
            .unwrap();
        // bottom = top of lower brick + joint
        assert!((state.ghost().bottom_y().unwrap() - (top + 1.2)).abs() < EPS);
    }

    #[test]
    fn test_select_and_deselect_clicks() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        let id = state.confirm_add().unwrap();
        state.set_active_tool(ToolKind::Select).unwrap();

        let hit = Intersection::element(id, DVec3::new(0.0, 6.2, 0.0));
        assert_eq!(state.handle_click(&[hit]).unwrap(), ClickOutcome::Selected(id));
        assert_eq!(
            state.handle_click(&[Intersection::ground(90.0, 0.0)]).unwrap(),
            ClickOutcome::Deselected
        );
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn test_duplicate_click_places_copy() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        let id = state.confirm_add().unwrap();
        state.set_active_tool(ToolKind::Select).unwrap();
        state.select_element(id).unwrap();
        state.trigger_duplicate().unwrap();

        assert!(state.handle_hover(&[Intersection::ground(30.0, 0.0)]));
        let outcome = state.handle_click(&[Intersection::ground(30.0, 0.0)]).unwrap();
        let ClickOutcome::Duplicated(copy) = outcome else {
            panic!("expected a duplicate, got {:?}", outcome);
        };
        assert_ne!(copy, id);
        assert_eq!(state.selection(), Some(copy));
        assert_eq!(state.mode(), Mode::Select);
        assert_eq!(state.element_count(), 2);
        assert!((state.element(copy).unwrap().transform.position[0] - 30.0).abs() < EPS);
    }

    #[test]
    fn test_duplicate_without_selection_reverts() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Duplicate).unwrap();
        assert_eq!(
            state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap(),
            ClickOutcome::RevertedToSelect
        );
        assert_eq!(state.mode(), Mode::Select);
    }

    #[test]
    fn test_move_hover_excludes_moved_element() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        state.handle_click(&[Intersection::ground(0.0, 0.0)]).unwrap();
        let id = state.confirm_add().unwrap();
        state.set_active_tool(ToolKind::Select).unwrap();
        state.select_element(id).unwrap();
        state.trigger_move().unwrap();

        let hits = [
            Intersection::element(id, DVec3::new(0.0, 6.2, 0.0)),
            Intersection::ground(12.0, 0.0),
        ];
        assert!(state.handle_hover(&hits));
        assert!((state.ghost().position().x - 12.0).abs() < EPS);
        assert!((state.ghost().bottom_y().unwrap() - 1.2).abs() < EPS);
    }

    #[test]
    fn test_add_idle_hover_keeps_ghost_hidden() {
        let mut state = EditorState::default();
        state.set_active_tool(ToolKind::Add).unwrap();
        assert!(!state.handle_hover(&[Intersection::ground(3.0, 3.0)]));
        assert!(!state.ghost().is_visible());
    }
}
