// InternDesk - ui/panels/dashboard.rs
//
// Dashboard screen: company header with the favorite toggle, animated stat
// cards, the monthly chart with a year selector, today's attendance, and
// the company profile.

use crate::app::fetch::DashboardData;
use crate::app::state::AppState;
use crate::core::animation::AnimatedStats;
use crate::ui::panels::{chart, skeleton};
use crate::ui::theme;
use std::time::Instant;

/// Render the dashboard (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState, now: Instant) {
    let dark_mode = state.dark_mode;
    let Some(ref data) = state.dashboard.data else {
        if state.dashboard.loading {
            skeleton::dashboard(ui, dark_mode);
        } else {
            ui.centered_and_justified(|ui| {
                ui.label("Dashboard data is not available.");
            });
        }
        return;
    };

    // Year changes and the favorite toggle are collected here and applied
    // after rendering so `data` can stay borrowed from `state`.
    let mut new_year: Option<i32> = None;
    let mut toggle_favorite = false;

    let counters = AnimatedStats::at(&data.stats, state.dashboard.counters_elapsed(now));
    let chart_elapsed = state.dashboard.chart_elapsed(now);
    let year = state.dashboard.chart_year;
    let mut hovered = state.dashboard.hovered_month;

    egui::ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            toggle_favorite = header(ui, data, state.dashboard.favorite);
            ui.add_space(12.0);

            stat_cards(ui, &counters, dark_mode);
            ui.add_space(16.0);

            card(ui, dark_mode, |ui| {
                ui.horizontal(|ui| {
                    ui.strong(format!("Interns added in {year}"));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{25b6}").on_hover_text("Next year").clicked() {
                            new_year = Some(year + 1);
                        }
                        ui.label(year.to_string());
                        if ui
                            .small_button("\u{25c0}")
                            .on_hover_text("Previous year")
                            .clicked()
                        {
                            new_year = Some(year - 1);
                        }
                    });
                });
                ui.add_space(8.0);
                chart::render(ui, &data.monthly, chart_elapsed, &mut hovered, dark_mode);
            });
            ui.add_space(16.0);

            card(ui, dark_mode, |ui| today_attendance(ui, data));
            ui.add_space(16.0);

            company_profile(ui, data);
        });

    state.dashboard.hovered_month = hovered;
    if toggle_favorite {
        state.toggle_favorite();
    }
    if let Some(year) = new_year {
        state.set_chart_year(year, now);
    }
}

fn card(ui: &mut egui::Ui, dark_mode: bool, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::group(ui.style())
        .fill(theme::card_fill(dark_mode))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

/// Company name, industry, MOA badge and the favorite star. Returns true
/// when the star was clicked.
fn header(ui: &mut egui::Ui, data: &DashboardData, favorite: bool) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.heading(data.company.display_name());
        let (star, colour) = if favorite {
            ("\u{2605}", theme::FAVORITE)
        } else {
            ("\u{2606}", theme::MUTED)
        };
        if ui
            .add(egui::Button::new(egui::RichText::new(star).size(18.0).color(colour)).frame(false))
            .on_hover_text("Favorite")
            .clicked()
        {
            clicked = true;
        }
    });
    ui.horizontal(|ui| {
        if !data.company.industry.is_empty() {
            ui.label(egui::RichText::new(&data.company.industry).weak());
            ui.separator();
        }
        let moa = data.company.moa_status;
        ui.label(
            egui::RichText::new(moa.label())
                .small()
                .strong()
                .color(theme::moa_colour(moa)),
        );
        if let Some(expires) = data.company.moa_expires {
            ui.label(egui::RichText::new(format!("until {}", expires.format("%b %-d, %Y"))).weak());
        }
    });
    clicked
}

fn stat_cards(ui: &mut egui::Ui, counters: &AnimatedStats, dark_mode: bool) {
    let cards = [
        ("Total interns", counters.total_interns.to_string(), theme::ACCENT),
        ("Present today", counters.present_today.to_string(), theme::SUCCESS),
        ("Late today", counters.late_today.to_string(), theme::WARNING),
        ("Absent today", counters.absent_today.to_string(), theme::DANGER),
        (
            "Attendance rate",
            format!("{:.1}%", counters.attendance_rate),
            theme::LINE,
        ),
    ];
    ui.horizontal_wrapped(|ui| {
        for (label, value, colour) in cards {
            egui::Frame::group(ui.style())
                .fill(theme::card_fill(dark_mode))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_min_width(theme::CARD_MIN_WIDTH);
                    ui.label(egui::RichText::new(value).size(26.0).strong().color(colour));
                    ui.label(egui::RichText::new(label).weak());
                });
        }
    });
}

fn today_attendance(ui: &mut egui::Ui, data: &DashboardData) {
    ui.strong("Today's attendance");
    ui.add_space(6.0);
    if data.today.is_empty() {
        ui.label(egui::RichText::new("No attendance recorded today.").weak());
        return;
    }

    egui::Grid::new("today_attendance")
        .num_columns(4)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Intern");
            ui.strong("Status");
            ui.strong("Morning");
            ui.strong("Afternoon");
            ui.end_row();

            for record in &data.today {
                let name = if record.intern_name.is_empty() {
                    record.student_id.as_str()
                } else {
                    record.intern_name.as_str()
                };
                ui.label(name);
                ui.colored_label(theme::attendance_colour(record.status), record.status.label());
                ui.label(record.morning());
                ui.label(record.afternoon());
                ui.end_row();
            }
        });
}

fn company_profile(ui: &mut egui::Ui, data: &DashboardData) {
    let company = &data.company;
    egui::CollapsingHeader::new("Company profile")
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new("company_profile")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    let rows = [
                        ("Contact person", company.contact_person.as_str()),
                        ("Email", company.email.as_str()),
                        ("Phone", company.phone.as_str()),
                        ("Address", company.address.as_str()),
                    ];
                    for (label, value) in rows {
                        ui.label(format!("{label}:"));
                        ui.label(if value.is_empty() { "--" } else { value });
                        ui.end_row();
                    }
                    if let Some(ref site) = company.website {
                        ui.label("Website:");
                        ui.hyperlink(site);
                        ui.end_row();
                    }
                });
            if let Some(ref description) = company.description {
                ui.add_space(6.0);
                ui.label(description);
            }
        });
}
