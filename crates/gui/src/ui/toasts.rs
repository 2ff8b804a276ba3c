//! Transient notifications over the viewport

use eframe::egui;

use crate::state::notifications::{Notification, NotificationLevel};

/// Seconds a notification stays on screen
const TOAST_SECS: f64 = 4.0;
const MAX_TOASTS: usize = 4;

#[derive(Default)]
pub struct Toasts {
    shown: Vec<(Notification, f64)>,
}

impl Toasts {
    pub fn push(&mut self, notification: Notification, now: f64) {
        self.shown.push((notification, now + TOAST_SECS));
        if self.shown.len() > MAX_TOASTS {
            self.shown.remove(0);
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, now: f64) {
        self.shown.retain(|(_, expires)| *expires > now);
        if self.shown.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_TOP, [0.0, 80.0])
            .interactable(false)
            .show(ctx, |ui| {
                for (notification, _) in &self.shown {
                    let fill = match notification.level {
                        NotificationLevel::Info => egui::Color32::from_rgb(0x2E, 0x7D, 0x32),
                        NotificationLevel::Warning => egui::Color32::from_rgb(0xEF, 0x6C, 0x00),
                        NotificationLevel::Error => egui::Color32::from_rgb(0xC6, 0x28, 0x28),
                    };
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(egui::CornerRadius::same(6))
                        .inner_margin(egui::Margin::symmetric(12, 6))
                        .show(ui, |ui| {
                            ui.colored_label(egui::Color32::WHITE, &notification.message);
                        });
                    ui.add_space(4.0);
                }
            });

        // Keep repainting until the last toast expires
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
