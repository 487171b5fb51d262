// InternDesk - ui/panels/skeleton.rs
//
// Pulsing placeholder blocks shown while a screen's first load is running.
// The caller keeps repainting while any screen is loading.

use crate::ui::theme;

/// Pulse period in seconds.
const PULSE_SECS: f64 = 1.2;

fn pulse(ui: &egui::Ui) -> f32 {
    let t = ui.input(|i| i.time) % PULSE_SECS / PULSE_SECS;
    // Triangle wave 0 -> 1 -> 0.
    (1.0 - (2.0 * t - 1.0).abs()) as f32
}

/// One placeholder block of `size`.
pub fn block(ui: &mut egui::Ui, size: egui::Vec2, dark_mode: bool) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 4.0, theme::skeleton_colour(dark_mode, pulse(ui)));
}

/// Dashboard placeholder: header line, a row of stat cards, the chart area.
pub fn dashboard(ui: &mut egui::Ui, dark_mode: bool) {
    block(ui, egui::vec2(240.0, 24.0), dark_mode);
    ui.add_space(4.0);
    block(ui, egui::vec2(160.0, 14.0), dark_mode);
    ui.add_space(16.0);
    ui.horizontal_wrapped(|ui| {
        for _ in 0..5 {
            block(ui, egui::vec2(theme::CARD_MIN_WIDTH, 72.0), dark_mode);
        }
    });
    ui.add_space(16.0);
    block(
        ui,
        egui::vec2(ui.available_width(), theme::CHART_HEIGHT),
        dark_mode,
    );
}

/// `count` list-row placeholders (roster, notifications).
pub fn rows(ui: &mut egui::Ui, count: usize, dark_mode: bool) {
    let width = ui.available_width();
    for _ in 0..count {
        ui.horizontal(|ui| {
            block(ui, egui::vec2(36.0, 36.0), dark_mode);
            ui.vertical(|ui| {
                block(ui, egui::vec2(width * 0.4, 14.0), dark_mode);
                ui.add_space(4.0);
                block(ui, egui::vec2(width * 0.7, 12.0), dark_mode);
            });
        });
        ui.add_space(12.0);
    }
}
