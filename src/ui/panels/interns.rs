// InternDesk - ui/panels/interns.rs
//
// Interns roster with search. Uses `ScrollArea::show_rows` so only the
// visible rows are laid out. Row buttons open the details, attendance and
// removal modals (see intern_modal.rs).

use crate::app::state::AppState;
use crate::ui::panels::skeleton;
use crate::ui::theme;
use chrono::NaiveDate;

enum RowAction {
    Details(String),
    Attendance(String),
    Remove(String),
}

/// Render the roster (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState, today: NaiveDate) {
    let mut search = state.interns.filter.search.clone();
    ui.horizontal(|ui| {
        ui.label("\u{1f50d}");
        let edit = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Search by name, ID, major or position")
                .desired_width(320.0),
        );
        if edit.changed() {
            state.set_intern_search(&search);
        }
        if !search.is_empty() && ui.small_button("\u{2715}").clicked() {
            state.set_intern_search("");
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!(
                "{} of {} interns",
                state.interns.filtered.len(),
                state.interns.list.len()
            ));
        });
    });
    ui.separator();

    if state.interns.loading && state.interns.list.is_empty() {
        skeleton::rows(ui, 6, state.dark_mode);
        return;
    }

    if state.interns.filtered.is_empty() {
        ui.centered_and_justified(|ui| {
            if state.interns.list.is_empty() {
                ui.label("No current interns.");
            } else {
                ui.label("No interns match your search.");
            }
        });
        return;
    }

    // Applied after show_rows so rows can borrow the list.
    let mut action: Option<RowAction> = None;

    egui::ScrollArea::vertical()
        .id_salt("interns_list")
        .auto_shrink([false; 2])
        .show_rows(
            ui,
            theme::ROW_HEIGHT,
            state.interns.filtered.len(),
            |ui, row_range| {
                for display_idx in row_range {
                    let Some(intern) = state
                        .interns
                        .filtered
                        .get(display_idx)
                        .and_then(|&idx| state.interns.list.get(idx))
                    else {
                        continue;
                    };
                    let pending = state
                        .interns
                        .pending_removals
                        .contains(&intern.application_id);

                    ui.horizontal(|ui| {
                        ui.set_min_height(theme::ROW_HEIGHT - 8.0);
                        ui.vertical(|ui| {
                            ui.strong(&intern.name);
                            let mut detail = vec![intern.student_id.as_str()];
                            if !intern.major.is_empty() {
                                detail.push(&intern.major);
                            }
                            if !intern.position.is_empty() {
                                detail.push(&intern.position);
                            }
                            ui.label(egui::RichText::new(detail.join(" \u{00b7} ")).weak());
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if pending {
                                ui.spinner();
                                ui.label(egui::RichText::new("Removing...").weak());
                                return;
                            }
                            let id = &intern.application_id;
                            if ui
                                .button(egui::RichText::new("Remove").color(theme::DANGER))
                                .clicked()
                            {
                                action = Some(RowAction::Remove(id.clone()));
                            }
                            if ui.button("Attendance").clicked() {
                                action = Some(RowAction::Attendance(id.clone()));
                            }
                            if ui.button("Details").clicked() {
                                action = Some(RowAction::Details(id.clone()));
                            }
                        });
                    });
                    ui.separator();
                }
            },
        );

    match action {
        Some(RowAction::Details(id)) => state.open_intern_details(&id),
        Some(RowAction::Attendance(id)) => state.open_attendance(&id, today),
        Some(RowAction::Remove(id)) => state.open_removal(&id),
        None => {}
    }
}
