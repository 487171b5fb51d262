// InternDesk - ui/panels/intern_modal.rs
//
// Roster modals: intern details, attendance history, and the remove-intern
// confirmation with its reason field. Each is a centred window shown while
// its slot in `InternsState` is occupied.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::MAX_REASON_LENGTH;

/// Render whichever roster modals are open.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    details(ctx, state);
    attendance(ctx, state);
    removal(ctx, state);
}

fn details(ctx: &egui::Context, state: &mut AppState) {
    let Some(intern) = state.interns.selected_intern() else {
        return;
    };

    let mut open = true;
    let mut close = false;
    egui::Window::new("Intern details")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(theme::MODAL_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.heading(&intern.name);
            ui.label(egui::RichText::new(&intern.email).weak());
            ui.add_space(8.0);

            let date = |d: Option<chrono::NaiveDate>| {
                d.map(|d| d.format("%b %-d, %Y").to_string())
                    .unwrap_or_else(|| "--".to_string())
            };
            egui::Grid::new("intern_details")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    let rows = [
                        ("Student ID", intern.student_id.clone()),
                        ("University", intern.university.clone()),
                        ("Major", intern.major.clone()),
                        ("Position", intern.position.clone()),
                        ("Start date", date(intern.start_date)),
                        ("End date", date(intern.end_date)),
                        (
                            "Approved",
                            date(intern.approved_at.map(|t| t.date_naive())),
                        ),
                    ];
                    for (label, value) in rows {
                        ui.label(format!("{label}:"));
                        ui.label(if value.is_empty() { "--".to_string() } else { value });
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.separator();
            ui.strong("Documents");
            if intern.documents.is_empty() {
                ui.label(egui::RichText::new("No documents submitted.").weak());
            } else {
                for doc in &intern.documents {
                    let mark = if doc.submitted { "\u{2714}" } else { "\u{2717}" };
                    ui.label(format!("{mark} {}", doc.name));
                }
            }

            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                close = true;
            }
        });

    if !open || close {
        state.interns.selected = None;
    }
}

fn attendance(ctx: &egui::Context, state: &mut AppState) {
    let Some(ref modal) = state.interns.attendance else {
        return;
    };

    let mut open = true;
    let mut close = false;
    egui::Window::new(format!("Attendance \u{2014} {}", modal.intern_name))
        .id(egui::Id::new("attendance_modal"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(theme::MODAL_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if modal.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading attendance...");
                });
            } else if modal.records.is_empty() {
                ui.label(egui::RichText::new("No attendance records in the last two weeks.").weak());
            } else {
                egui::ScrollArea::vertical()
                    .id_salt("attendance_rows")
                    .max_height(280.0)
                    .show(ui, |ui| {
                        egui::Grid::new("attendance_table")
                            .num_columns(4)
                            .striped(true)
                            .spacing([16.0, 4.0])
                            .show(ui, |ui| {
                                ui.strong("Date");
                                ui.strong("Status");
                                ui.strong("Morning");
                                ui.strong("Afternoon");
                                ui.end_row();
                                for record in &modal.records {
                                    let date = record
                                        .date
                                        .map(|d| d.format("%a %b %-d").to_string())
                                        .unwrap_or_else(|| "--".to_string());
                                    ui.label(date);
                                    ui.colored_label(
                                        theme::attendance_colour(record.status),
                                        record.status.label(),
                                    );
                                    ui.label(record.morning());
                                    ui.label(record.afternoon());
                                    ui.end_row();
                                }
                            });
                    });
            }

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                // Manual marking has no backend endpoint yet.
                ui.add_enabled(false, egui::Button::new("Mark present"))
                    .on_disabled_hover_text("Manual marking is not available yet");
                ui.add_enabled(false, egui::Button::new("Mark absent"))
                    .on_disabled_hover_text("Manual marking is not available yet");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
        });

    if !open || close {
        state.interns.attendance = None;
    }
}

fn removal(ctx: &egui::Context, state: &mut AppState) {
    let Some(ref mut dialog) = state.interns.removal else {
        return;
    };

    let mut confirm = false;
    let mut cancel = false;
    egui::Window::new("Remove intern")
        .collapsible(false)
        .resizable(false)
        .min_width(theme::MODAL_WIDTH)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Remove {} from your current interns? Their application will be marked as rejected.",
                dialog.intern_name
            ));
            ui.add_space(8.0);
            ui.label("Reason:");
            let edit = ui.add(
                egui::TextEdit::multiline(&mut dialog.reason)
                    .char_limit(MAX_REASON_LENGTH)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Why is this intern being removed?"),
            );
            if edit.changed() {
                dialog.error = None;
            }
            if let Some(ref error) = dialog.error {
                ui.colored_label(theme::DANGER, error);
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Remove").color(theme::DANGER))
                    .clicked()
                {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        state.confirm_removal();
    } else if cancel {
        state.cancel_removal();
    }
}
