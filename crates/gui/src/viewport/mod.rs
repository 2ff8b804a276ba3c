//! 3D viewport panel: camera navigation, picking and scene painting

mod camera;
mod context_menu;
mod renderer;
pub use assise_gui_lib::viewport::picking;

use egui::{PointerButton, Pos2, Ui};

use crate::input::{PointerRelease, PointerTracker};
use crate::state::settings::EditorSettings;
use crate::state::{EditorState, Mode};
use camera::OrbitCamera;

/// Degrees of orbit per dragged pixel
const ORBIT_SPEED: f32 = 0.3;
/// Zoom factor per scrolled point
const SCROLL_ZOOM: f32 = 0.0015;

pub struct ViewportPanel {
    camera: OrbitCamera,
    pointer: PointerTracker,
    last_hover: Option<Pos2>,
}

impl ViewportPanel {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            camera: OrbitCamera::new(),
            pointer: PointerTracker::new(
                settings.input.long_press_ms,
                settings.input.drag_threshold_px,
            ),
            last_hover: None,
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = OrbitCamera::new();
    }

    /// Orbit around the target by `angle` radians
    pub fn orbit(&mut self, angle: f32) {
        self.camera.rotate(angle.to_degrees(), 0.0);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.camera.zoom_by(factor);
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut EditorState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let (now, pointer_pos, pressed, released, delta, scroll) = ui.input(|i| {
            (
                i.time,
                i.pointer.interact_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta(),
                i.smooth_scroll_delta.y,
            )
        });

        // ── Primary button: click, orbit drag, long press ───
        if pressed && response.hovered() {
            if let Some(pos) = pointer_pos {
                let target = if state.mode() == Mode::Select {
                    state
                        .pick(&self.camera.screen_ray(pos, rect))
                        .iter()
                        .find_map(|h| h.element_id())
                } else {
                    None
                };
                self.pointer.down([pos.x, pos.y], now, target);
            }
        }

        if self.pointer.is_pressed() {
            if let Some(pos) = pointer_pos {
                self.pointer.moved([pos.x, pos.y]);
            }
            if self.pointer.is_dragging() && state.navigation_enabled() {
                self.camera.rotate(-delta.x * ORBIT_SPEED, delta.y * ORBIT_SPEED);
            }
            if let Some(press) = self.pointer.poll(now) {
                let anchor = [press.pos[0] - rect.min.x, press.pos[1] - rect.min.y];
                let result = state.open_context_menu(press.target, anchor);
                state.run(result);
            }
            // Long press fires without further input
            ui.ctx().request_repaint();
        }

        if released {
            let pos = pointer_pos.map_or([0.0, 0.0], |p| [p.x, p.y]);
            if let Some(PointerRelease::Click { pos }) = self.pointer.up(pos, now) {
                self.on_click(egui::pos2(pos[0], pos[1]), rect, state);
            }
        }

        // ── Secondary / middle drag pans, wheel zooms ───────
        if response.dragged_by(PointerButton::Secondary) || response.dragged_by(PointerButton::Middle) {
            let d = response.drag_delta();
            self.camera.pan(d.x, d.y);
        }
        if response.hovered() && scroll != 0.0 {
            self.camera.zoom_by((-scroll * SCROLL_ZOOM).exp());
        }

        // ── Hover: ghost follows the pointer ────────────────
        if !self.pointer.is_pressed() {
            if let Some(pos) = response.hover_pos() {
                if self.last_hover != Some(pos) {
                    self.last_hover = Some(pos);
                    let hits = state.pick(&self.camera.screen_ray(pos, rect));
                    state.handle_hover(&hits);
                }
            }
        }

        renderer::paint_viewport(ui, rect, &self.camera, state);
        context_menu::show(ui.ctx(), rect, state);
    }

    fn on_click(&mut self, pos: Pos2, rect: egui::Rect, state: &mut EditorState) {
        if state.context_menu().is_some() {
            state.close_context_menu();
            return;
        }
        if !rect.contains(pos) {
            return;
        }
        let hits = state.pick(&self.camera.screen_ray(pos, rect));
        tracing::debug!("Viewport click at ({:.0}, {:.0}): {} hit(s)", pos.x, pos.y, hits.len());
        let result = state.handle_click(&hits);
        state.run(result);
    }
}
