// InternDesk - ui/panels/notifications.rs
//
// Notification feed: filter chips with counts, "Mark all read", and the
// list itself. Read-state changes wait for server confirmation; pending
// rows show a spinner instead of their button.

use crate::app::state::AppState;
use crate::core::filter;
use crate::ui::panels::skeleton;
use crate::ui::theme;
use chrono::{DateTime, Utc};

/// Short relative age such as "just now", "5m ago", "3h ago", "2d ago";
/// older than a week shows the date.
pub fn format_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return String::new();
    };
    let secs = (now - created_at).num_seconds();
    match secs {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 7 * 86_400 => format!("{}d ago", s / 86_400),
        _ => created_at.format("%b %-d, %Y").to_string(),
    }
}

/// Render the feed (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let counts = filter::notification_counts(&state.notifications.list);
    let mut new_filter = None;
    let mut mark_all = false;

    ui.horizontal(|ui| {
        for (f, count) in counts {
            let selected = state.notifications.filter == f;
            if ui
                .selectable_label(selected, format!("{} ({count})", f.label()))
                .clicked()
                && !selected
            {
                new_filter = Some(f);
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let marking_all = state.notifications.is_marking_all();
            if marking_all {
                ui.spinner();
            }
            let enabled = state.notifications.unread_count > 0 && !marking_all;
            if ui
                .add_enabled(enabled, egui::Button::new("Mark all read"))
                .clicked()
            {
                mark_all = true;
            }
        });
    });
    ui.separator();

    if let Some(f) = new_filter {
        state.set_notification_filter(f);
    }
    if mark_all {
        state.mark_all_read();
    }

    if state.notifications.loading && state.notifications.list.is_empty() {
        skeleton::rows(ui, 6, state.dark_mode);
        return;
    }

    if state.notifications.filtered.is_empty() {
        ui.centered_and_justified(|ui| {
            if state.notifications.list.is_empty() {
                ui.label("You have no notifications.");
            } else {
                ui.label("No notifications match this filter.");
            }
        });
        return;
    }

    let now = Utc::now();
    let mut mark_one: Option<String> = None;

    egui::ScrollArea::vertical()
        .id_salt("notifications_list")
        .auto_shrink([false; 2])
        .show_rows(
            ui,
            theme::ROW_HEIGHT,
            state.notifications.filtered.len(),
            |ui, row_range| {
                for display_idx in row_range {
                    let Some(note) = state
                        .notifications
                        .filtered
                        .get(display_idx)
                        .and_then(|&idx| state.notifications.list.get(idx))
                    else {
                        continue;
                    };

                    ui.horizontal(|ui| {
                        ui.set_min_height(theme::ROW_HEIGHT - 8.0);
                        ui.label(egui::RichText::new(theme::notification_icon(note.kind)).size(20.0));
                        ui.vertical(|ui| {
                            ui.horizontal(|ui| {
                                let title = egui::RichText::new(&note.title);
                                ui.label(if note.is_read { title } else { title.strong() });
                                if note.is_important {
                                    ui.colored_label(theme::DANGER, egui::RichText::new("Important").small());
                                }
                                if note.action_required {
                                    ui.colored_label(
                                        theme::WARNING,
                                        egui::RichText::new("Action required").small(),
                                    );
                                }
                            });
                            ui.label(egui::RichText::new(&note.message).weak());
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format_age(note.created_at, now))
                                    .small()
                                    .weak(),
                            );
                            if note.is_read {
                                return;
                            }
                            if state.notifications.is_pending(&note.id) {
                                ui.spinner();
                            } else if ui.small_button("Mark read").clicked() {
                                mark_one = Some(note.id.clone());
                            }
                        });
                    });
                    ui.separator();
                }
            },
        );

    if let Some(id) = mark_one {
        state.mark_read(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_age_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        assert_eq!(format_age(None, now), "");
        assert_eq!(format_age(Some(now - Duration::seconds(30)), now), "just now");
        assert_eq!(format_age(Some(now - Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_age(Some(now - Duration::hours(3)), now), "3h ago");
        assert_eq!(format_age(Some(now - Duration::days(2)), now), "2d ago");
        assert_eq!(format_age(Some(now - Duration::days(30)), now), "May 21, 2025");
    }
}
