//! Main application module

mod keyboard;
mod menus;
mod styles;

use eframe::egui;

use crate::state::{EditorSettings, EditorState};
use crate::ui::{placement_controls, side_panel, status_bar, toasts, toolbar};
use crate::viewport::ViewportPanel;

/// Main application
pub struct AssiseApp {
    state: EditorState,
    viewport: ViewportPanel,
    toasts: toasts::Toasts,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
    /// Last saved layout version (for autosave)
    last_saved_version: u64,
}

impl AssiseApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_layout: Option<shared::LayoutDocument>,
    ) -> Self {
        let settings = EditorSettings::load();
        crate::i18n::set_lang(settings.ui.language);
        let mut state = EditorState::new(settings);

        // Load initial layout: CLI argument takes priority, then autosave
        if let Some(doc) = initial_layout {
            let result = state.restore(doc);
            state.run(result);
        } else if let Some(autosave) = EditorState::load_autosave() {
            let result = state.restore(autosave);
            if state.run(result).is_some() {
                tracing::info!("Loaded autosave layout");
            }
        }

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, state.settings.ui.font_size);

        let viewport = ViewportPanel::new(&state.settings);
        let last_font_size = state.settings.ui.font_size;
        let last_saved_version = state.layout_version();

        Self {
            state,
            viewport,
            toasts: toasts::Toasts::default(),
            last_font_size,
            last_saved_version,
        }
    }
}

impl eframe::App for AssiseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        // Autosave layout if changed
        let current_version = self.state.layout_version();
        if current_version != self.last_saved_version {
            self.state.autosave();
            self.last_saved_version = current_version;
        }

        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport);
                menus::language_menu(ui, &mut self.state);
            });
        });

        // ── Toolbar ───────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                toolbar::show(ui, &mut self.state, &mut self.viewport);
            });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state);
            });

        // ── Left panel: element type, joint, courses ─────────
        egui::SidePanel::left("side_panel")
            .default_width(240.0)
            .width_range(180.0..=400.0)
            .resizable(true)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    side_panel::show(ui, &mut self.state);
                });
            });

        // ── Central panel: 3D viewport ───────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });

        // ── Floating placement controls ──────────────────────
        placement_controls::show(ctx, &mut self.state);

        // ── Notifications ────────────────────────────────────
        let now = ctx.input(|i| i.time);
        for notification in self.state.take_notifications() {
            self.toasts.push(notification, now);
        }
        self.toasts.show(ctx, now);
    }
}
