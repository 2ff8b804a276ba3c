//! Application menu bar

use eframe::egui;

use crate::i18n::{lang, set_lang, t, tf};
use crate::state::{EditorState, Language};
use crate::viewport::ViewportPanel;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut EditorState) {
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.new")).clicked() {
            state.new_layout();
            ui.close_menu();
        }
        if ui.button(t("menu.open")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                let result = state.load_layout(&path);
                if let Some(count) = state.run(result) {
                    let message = tf("notify.loaded", &[&count.to_string()]);
                    state.notifications_mut().info(message);
                }
            }
        }
        if ui.button(t("menu.save")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.save_title"))
                .add_filter("JSON", &["json"])
                .set_file_name("plan.json")
                .save_file()
            {
                let result = state.save_layout(&path);
                if state.run(result).is_some() {
                    state.notifications_mut().info(t("notify.saved"));
                }
            }
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Show the view menu
pub fn view_menu(ui: &mut egui::Ui, state: &mut EditorState, viewport: &mut ViewportPanel) {
    ui.menu_button(t("menu.view"), |ui| {
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            ui.close_menu();
        }
        if ui
            .checkbox(&mut state.settings.grid.visible, t("menu.grid"))
            .changed()
        {
            state.settings.save();
        }
    });
}

/// Show the language menu
pub fn language_menu(ui: &mut egui::Ui, state: &mut EditorState) {
    ui.menu_button(t("menu.language"), |ui| {
        for (language, label) in [(Language::Fr, "Français"), (Language::En, "English")] {
            if ui.selectable_label(lang() == language, label).clicked() {
                set_lang(language);
                state.settings.ui.language = language;
                state.settings.save();
                ui.close_menu();
            }
        }
    });
}
