//! Floating DPad shown while a ghost is being positioned

use eframe::egui;

use crate::error::EditorResult;
use crate::i18n::t;
use crate::state::{EditorState, Mode};

enum Control {
    Nudge(i32, i32),
    Vertical(i32),
    Rotate(i32),
    Confirm,
    Cancel,
}

pub fn show(ctx: &egui::Context, state: &mut EditorState) {
    let mode = state.mode();
    if !mode.is_positioning() {
        return;
    }

    let mut pressed: Option<Control> = None;
    egui::Window::new(t("place.title"))
        .id(egui::Id::new("placement_controls"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -36.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                egui::Grid::new("dpad").spacing([4.0, 4.0]).show(ui, |ui| {
                    ui.label("");
                    if ui.button("▲").clicked() {
                        pressed = Some(Control::Nudge(0, -1));
                    }
                    ui.label("");
                    ui.end_row();

                    if ui.button("◀").clicked() {
                        pressed = Some(Control::Nudge(-1, 0));
                    }
                    ui.label("");
                    if ui.button("▶").clicked() {
                        pressed = Some(Control::Nudge(1, 0));
                    }
                    ui.end_row();

                    ui.label("");
                    if ui.button("▼").clicked() {
                        pressed = Some(Control::Nudge(0, 1));
                    }
                    ui.label("");
                    ui.end_row();
                });

                ui.separator();
                ui.vertical(|ui| {
                    if ui.button(t("place.up")).clicked() {
                        pressed = Some(Control::Vertical(1));
                    }
                    if ui.button(t("place.down")).clicked() {
                        pressed = Some(Control::Vertical(-1));
                    }
                });
                ui.vertical(|ui| {
                    if ui.button("↺ Q").clicked() {
                        pressed = Some(Control::Rotate(-1));
                    }
                    if ui.button("↻ E").clicked() {
                        pressed = Some(Control::Rotate(1));
                    }
                });
            });

            ui.separator();
            ui.horizontal(|ui| {
                let confirm = if mode == Mode::MovePositioning {
                    t("place.confirm_move")
                } else {
                    t("place.confirm")
                };
                if ui.button(format!("✔ {confirm}")).clicked() {
                    pressed = Some(Control::Confirm);
                }
                if ui.button(format!("✖ {}", t("place.cancel"))).clicked() {
                    pressed = Some(Control::Cancel);
                }
            });
        });

    let Some(control) = pressed else {
        return;
    };
    let result: EditorResult<()> = match control {
        Control::Nudge(x, z) => state.nudge_ghost_steps(x, z),
        Control::Vertical(dir) => state.step_ghost_vertical(dir),
        Control::Rotate(dir) => state.rotate_ghost_step(dir),
        Control::Confirm => state.confirm().map(|_| ()),
        Control::Cancel => state.cancel(),
    };
    state.run(result);
}
