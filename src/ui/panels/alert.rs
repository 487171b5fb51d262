// InternDesk - ui/panels/alert.rs
//
// Generic confirmation/failure dialog for user-initiated actions.
// Shows the oldest queued alert; OK dismisses it and reveals the next.

use crate::app::state::{AlertKind, AppState};
use crate::ui::theme;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(alert) = state.alerts.front() else {
        return;
    };

    let colour = match alert.kind {
        AlertKind::Success => theme::SUCCESS,
        AlertKind::Failure => theme::DANGER,
    };

    let mut dismissed = false;
    egui::Window::new(egui::RichText::new(&alert.title).color(colour))
        .id(egui::Id::new("alert_dialog"))
        .collapsible(false)
        .resizable(false)
        .min_width(300.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(&alert.message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("  OK  ").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.alerts.pop_front();
    }
}
