use egui::Ui;

use crate::i18n::t;
use crate::state::EditorState;

pub fn show(ui: &mut Ui, state: &EditorState) {
    ui.horizontal(|ui| {
        ui.weak(format!("{}: {}", t("status.elements"), state.element_count()));

        ui.separator();

        let selected = match state.selection() {
            Some(id) => id.to_string(),
            None => t("status.none").to_string(),
        };
        ui.weak(format!("{}: {selected}", t("status.selected")));

        ui.separator();

        if state.mode().is_positioning() {
            ui.colored_label(egui::Color32::from_rgb(0x2E, 0x7D, 0x32), state.info_text());
        } else {
            ui.label(state.info_text());
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Assise v", env!("CARGO_PKG_VERSION")));
        });
    });
}
