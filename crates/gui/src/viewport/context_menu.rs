//! Element context menu drawn over the viewport

use egui::Rect;

use crate::i18n::t;
use crate::state::context_menu::clamp_menu_position;
use crate::state::{ContextAction, EditorState};

/// Approximate menu size used for clamping before the first layout
const MENU_SIZE: [f32; 2] = [150.0, 130.0];

fn label(action: ContextAction) -> &'static str {
    match action {
        ContextAction::Rotate => t("ctx.rotate"),
        ContextAction::Move => t("ctx.move"),
        ContextAction::Duplicate => t("ctx.duplicate"),
        ContextAction::Delete => t("ctx.delete"),
    }
}

/// Show the open context menu, if any. Clicks in the viewport close it
/// (see `ViewportPanel::show`).
pub fn show(ctx: &egui::Context, viewport_rect: Rect, state: &mut EditorState) {
    let Some(menu) = state.context_menu().copied() else {
        return;
    };

    let local = clamp_menu_position(
        menu.anchor,
        MENU_SIZE,
        [viewport_rect.width(), viewport_rect.height()],
    );
    let pos = viewport_rect.min + egui::vec2(local[0], local[1]);

    let mut chosen = None;
    egui::Area::new(egui::Id::new("element_context_menu"))
        .order(egui::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(MENU_SIZE[0] - 16.0);
                ui.strong(format!("#{}", menu.target));
                ui.separator();
                for action in ContextAction::ALL {
                    if ui.button(label(action)).clicked() {
                        chosen = Some(action);
                    }
                }
            });
        });

    if let Some(action) = chosen {
        let result = state.context_menu_action(action);
        state.run(result);
    }
}
