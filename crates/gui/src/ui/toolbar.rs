//! Tool buttons and view navigation

use egui::Ui;

use crate::i18n::t;
use crate::state::{EditorState, Tool, ToolKind};
use crate::viewport::ViewportPanel;

/// Label key and shortcut letter of each toolbar button
const BUTTONS: [(ToolKind, &str, &str); 6] = [
    (ToolKind::Select, "tool.select", "S"),
    (ToolKind::Add, "tool.add", "A"),
    (ToolKind::Move, "tool.move", "M"),
    (ToolKind::Rotate, "tool.rotate", "R"),
    (ToolKind::Duplicate, "tool.duplicate", "D"),
    (ToolKind::Delete, "tool.delete", "Suppr"),
];

pub fn show(ui: &mut Ui, state: &mut EditorState, viewport: &mut ViewportPanel) {
    ui.horizontal(|ui| {
        let availability = state.tool_availability();
        for (kind, key, shortcut) in BUTTONS {
            let active = kind.as_tool().is_some_and(|tool| tool == state.tool());
            let button = egui::Button::new(t(key)).selected(active);
            let response = ui
                .add_enabled(availability.allows(kind), button)
                .on_hover_text(format!("{} ({})", t(key), shortcut));
            if response.clicked() {
                let result = state.toolbar_action(kind);
                state.run(result);
            }
        }

        ui.separator();

        // Navigation only orbits with the select tool
        ui.add_enabled_ui(state.tool() == Tool::Select, |ui| {
            if ui.button("⟲").on_hover_text(t("tb.orbit_left")).clicked() {
                viewport.orbit(0.1);
            }
            if ui.button("⟳").on_hover_text(t("tb.orbit_right")).clicked() {
                viewport.orbit(-0.1);
            }
        });
        if ui.button("+").on_hover_text(t("tb.zoom_in")).clicked() {
            viewport.zoom(0.8);
        }
        if ui.button("−").on_hover_text(t("tb.zoom_out")).clicked() {
            viewport.zoom(1.2);
        }
    });
}
