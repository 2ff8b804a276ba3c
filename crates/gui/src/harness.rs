//! Headless test harness for driving the editor without a window.
//!
//! Clicks are expressed in world coordinates and go through the same ray
//! picking as the viewport.

use glam::DVec3;
use shared::{Catalog, ElementId, LayoutDocument};

use crate::error::EditorResult;
use crate::input::{EditorKey, PointerRelease, PointerTracker};
use crate::state::{ClickOutcome, EditorSettings, EditorState, Mode, ToolKind};
use crate::viewport::picking::{Intersection, Ray};

/// Headless editor plus a simulated pointer
pub struct TestHarness {
    pub state: EditorState,
    pointer: PointerTracker,
    /// Simulated clock (seconds)
    clock: f64,
}

impl TestHarness {
    /// Harness with default settings and the built-in catalog
    pub fn new() -> Self {
        Self::with_state(EditorState::default())
    }

    /// Harness over a custom catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self::with_state(EditorState::with_catalog(EditorSettings::default(), catalog))
    }

    fn with_state(state: EditorState) -> Self {
        let pointer = PointerTracker::new(
            state.settings.input.long_press_ms,
            state.settings.input.drag_threshold_px,
        );
        Self {
            state,
            pointer,
            clock: 0.0,
        }
    }

    // ── Pointer ───────────────────────────────────────────────

    /// Hits of a vertical ray over (x, z): elements first, ground last
    pub fn hits_at(&self, x: f64, z: f64) -> Vec<Intersection> {
        self.state.pick(&Ray::vertical(x, z))
    }

    /// Click straight down over (x, z)
    pub fn click_at(&mut self, x: f64, z: f64) -> EditorResult<ClickOutcome> {
        let hits = self.hits_at(x, z);
        self.state.handle_click(&hits)
    }

    /// Click the ground at (x, z), ignoring anything placed above it
    pub fn click_ground(&mut self, x: f64, z: f64) -> EditorResult<ClickOutcome> {
        self.state.handle_click(&[Intersection::ground(x, z)])
    }

    /// Click the top face of an element, at its center
    pub fn click_element(&mut self, id: ElementId) -> EditorResult<ClickOutcome> {
        let hit = self.element_top(id);
        self.state.handle_click(&hit)
    }

    /// Hover straight down over (x, z)
    pub fn hover_at(&mut self, x: f64, z: f64) -> bool {
        let hits = self.hits_at(x, z);
        self.state.handle_hover(&hits)
    }

    /// Hover the ground at (x, z)
    pub fn hover_ground(&mut self, x: f64, z: f64) -> bool {
        self.state.handle_hover(&[Intersection::ground(x, z)])
    }

    /// Press and hold on an element for `secs`, then release. Opens the
    /// context menu when held long enough with the select tool.
    pub fn long_press(&mut self, id: ElementId, secs: f64) -> Option<PointerRelease> {
        let pos = [200.0, 150.0];
        let target = (self.state.mode() == Mode::Select).then_some(id);
        self.pointer.down(pos, self.clock, target);
        self.clock += secs;
        if let Some(press) = self.pointer.poll(self.clock) {
            let result = self.state.open_context_menu(press.target, press.pos);
            self.state.run(result);
        }
        let release = self.pointer.up(pos, self.clock);
        self.clock += 0.1;
        release
    }

    fn element_top(&self, id: ElementId) -> Vec<Intersection> {
        let top = self
            .state
            .element_boxes()
            .into_iter()
            .find(|b| b.id == id)
            .map(|b| DVec3::new(b.center.x, b.top_y(), b.center.z));
        match top {
            Some(point) => vec![Intersection::element(id, point)],
            None => Vec::new(),
        }
    }

    // ── Shortcuts ─────────────────────────────────────────────

    pub fn tool(&mut self, kind: ToolKind) -> EditorResult<()> {
        self.state.set_active_tool(kind)
    }

    pub fn key(&mut self, key: EditorKey) -> EditorResult<bool> {
        self.state.handle_key(key)
    }

    /// Add tool, click the ground, confirm. Returns the new id.
    pub fn place_at(&mut self, x: f64, z: f64) -> EditorResult<ElementId> {
        if self.state.tool() != crate::state::Tool::Add {
            self.tool(ToolKind::Add)?;
        }
        self.click_ground(x, z)?;
        self.state.confirm_add()
    }

    // ── Layout ────────────────────────────────────────────────

    pub fn export_layout_json(&self) -> String {
        match self.state.snapshot().to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Layout serialization failed: {}", e);
                String::new()
            }
        }
    }

    pub fn load_layout_json(&mut self, json: &str) -> Result<usize, String> {
        let doc = LayoutDocument::from_json(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.state.restore(doc).map_err(|e| e.to_string())
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn element_count(&self) -> usize {
        self.state.element_count()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn ghost_position(&self) -> Option<DVec3> {
        let ghost = self.state.ghost();
        ghost.is_visible().then(|| ghost.position())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.element_count(), 0);
        assert_eq!(h.mode(), Mode::Select);
        assert_eq!(h.ghost_position(), None);
    }

    #[test]
    fn test_place_and_click_select() {
        let mut h = TestHarness::new();
        let id = h.place_at(0.0, 0.0).unwrap();
        h.tool(ToolKind::Select).unwrap();
        assert_eq!(h.click_at(0.0, 0.0).unwrap(), ClickOutcome::Selected(id));
        assert_eq!(h.click_at(300.0, 300.0).unwrap(), ClickOutcome::Deselected);
    }

    #[test]
    fn test_click_at_stacks_on_element() {
        let mut h = TestHarness::new();
        let below = h.place_at(0.0, 0.0).unwrap();
        let top = h.state.element_boxes()[0].top_y();
        h.click_at(0.0, 0.0).unwrap();
        let bottom = h.state.ghost().bottom_y().unwrap();
        assert!((bottom - (top + 1.2)).abs() < 1e-9, "{below}: {bottom}");
    }

    #[test]
    fn test_long_press_opens_menu() {
        let mut h = TestHarness::new();
        let id = h.place_at(0.0, 0.0).unwrap();
        h.tool(ToolKind::Select).unwrap();

        assert!(matches!(h.long_press(id, 0.2), Some(PointerRelease::Click { .. })));
        assert!(h.state.context_menu().is_none());

        assert_eq!(h.long_press(id, 0.6), Some(PointerRelease::AfterLongPress));
        assert_eq!(h.state.context_menu().map(|m| m.target), Some(id));
        assert_eq!(h.state.selection(), Some(id));
    }

    #[test]
    fn test_layout_json_roundtrip() {
        let mut h = TestHarness::new();
        h.place_at(0.0, 0.0).unwrap();
        h.place_at(50.0, 0.0).unwrap();
        let json = h.export_layout_json();

        let mut h2 = TestHarness::new();
        assert_eq!(h2.load_layout_json(&json).unwrap(), 2);
        assert!(h2.load_layout_json("not json").is_err());
    }
}
