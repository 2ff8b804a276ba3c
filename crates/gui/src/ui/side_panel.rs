//! Element type, custom dimensions, joint thickness and courses

use egui::Ui;
use shared::CUSTOM_TYPE_ID;

use crate::i18n::t;
use crate::state::EditorState;

pub fn show(ui: &mut Ui, state: &mut EditorState) {
    let availability = state.tool_availability();

    ui.heading(t("panel.element"));
    ui.add_enabled_ui(availability.settings_inputs, |ui| {
        type_selector(ui, state);
    });

    ui.add_space(6.0);
    ui.add_enabled_ui(availability.custom_inputs, |ui| {
        custom_inputs(ui, state);
    });

    ui.separator();
    ui.add_enabled_ui(availability.settings_inputs, |ui| {
        joint_input(ui, state);
        ui.add_space(6.0);
        course_selector(ui, state);
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("{}:", t("panel.count")));
        ui.strong(state.element_count().to_string());
    });
}

fn type_selector(ui: &mut Ui, state: &mut EditorState) {
    let current = state.type_choice().selected_id.clone();
    let current_label = if current == CUSTOM_TYPE_ID {
        t("panel.custom").to_string()
    } else {
        state
            .catalog()
            .get(&current)
            .map(|e| e.label())
            .unwrap_or_else(|| current.clone())
    };

    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("element_type")
        .selected_text(current_label)
        .width(ui.available_width())
        .height(400.0)
        .show_ui(ui, |ui| {
            for entry in state.catalog().entries() {
                if ui.selectable_label(entry.id == current, entry.label()).clicked() {
                    chosen = Some(entry.id.clone());
                }
            }
            ui.separator();
            if ui
                .selectable_label(current == CUSTOM_TYPE_ID, t("panel.custom"))
                .clicked()
            {
                chosen = Some(CUSTOM_TYPE_ID.to_string());
            }
        });

    if let Some(id) = chosen {
        let result = state.choose_type(&id);
        state.run(result);
    }
}

fn custom_inputs(ui: &mut Ui, state: &mut EditorState) {
    let inputs = state.custom_inputs_mut();
    egui::Grid::new("custom_inputs")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label(t("panel.custom_name"));
            ui.text_edit_singleline(&mut inputs.name);
            ui.end_row();

            for (key, value) in [
                ("panel.width", &mut inputs.width),
                ("panel.height", &mut inputs.height),
                ("panel.depth", &mut inputs.depth),
            ] {
                ui.label(t(key));
                ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
                ui.end_row();
            }
        });

    // Show evaluation errors inline while typing
    if state.type_choice().is_custom() {
        if let Err(e) = state.type_choice().custom.to_type_def() {
            ui.colored_label(egui::Color32::from_rgb(0xC6, 0x28, 0x28), e.to_string());
        }
    }
}

fn joint_input(ui: &mut Ui, state: &mut EditorState) {
    let mut joint = state.joint_thickness();
    ui.horizontal(|ui| {
        ui.label(t("panel.joint"));
        let response = ui.add(
            egui::DragValue::new(&mut joint)
                .speed(0.1)
                .range(0.0..=10.0)
                .max_decimals(2),
        );
        if response.changed() {
            let result = state.set_joint_thickness(joint);
            state.run(result);
        }
    });
}

fn course_selector(ui: &mut Ui, state: &mut EditorState) {
    ui.label(t("panel.course"));
    let active = state.courses().active_id().to_string();
    let active_label = state
        .courses()
        .active_course()
        .map(|c| c.label())
        .unwrap_or_else(|| active.clone());

    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("course")
        .selected_text(active_label)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for course in state.courses().courses() {
                if ui.selectable_label(course.id == active, course.label()).clicked() {
                    chosen = Some(course.id.clone());
                }
            }
        });
    if let Some(id) = chosen {
        let result = state.select_course(&id);
        state.run(result);
    }

    if ui.button(t("panel.create_course")).clicked() {
        let result = state.create_course();
        state.run(result);
    }
}
