// InternDesk - ui/theme.rs
//
// Colour scheme, status colour mapping, visuals, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{AttendanceStatus, MoaStatus, NotificationKind};
use egui::Color32;

/// Brand accent (bars, active tab, primary buttons).
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235); // Blue 600
/// Cumulative line.
pub const LINE: Color32 = Color32::from_rgb(16, 185, 129); // Emerald 500
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const WARNING: Color32 = Color32::from_rgb(217, 119, 6); // Amber 600
pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38); // Red 600
pub const MUTED: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500
pub const FAVORITE: Color32 = Color32::from_rgb(250, 204, 21); // Yellow 400

pub fn attendance_colour(status: AttendanceStatus) -> Color32 {
    match status {
        AttendanceStatus::Present => SUCCESS,
        AttendanceStatus::Late => WARNING,
        AttendanceStatus::Absent => DANGER,
    }
}

pub fn moa_colour(status: MoaStatus) -> Color32 {
    match status {
        MoaStatus::Active => SUCCESS,
        MoaStatus::Pending => WARNING,
        MoaStatus::Expired => DANGER,
        MoaStatus::None => MUTED,
    }
}

/// Leading glyph for a notification row.
pub fn notification_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Application => "\u{1f4dd}",
        NotificationKind::Attendance => "\u{23f0}",
        NotificationKind::Document => "\u{1f4c4}",
        NotificationKind::System => "\u{2699}",
        NotificationKind::Reminder => "\u{1f514}",
    }
}

/// Card background: slightly lifted from the panel fill.
pub fn card_fill(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(31, 41, 55) // Gray 800
    } else {
        Color32::from_rgb(249, 250, 251) // Gray 50
    }
}

/// Skeleton placeholder base colour; `pulse` in 0..=1 brightens it.
pub fn skeleton_colour(dark_mode: bool, pulse: f32) -> Color32 {
    let pulse = pulse.clamp(0.0, 1.0);
    let (base, span) = if dark_mode { (55.0, 20.0) } else { (220.0, 18.0) };
    let v = (base + span * pulse) as u8;
    Color32::from_rgb(v, v, v.saturating_add(4))
}

/// Chart grid lines.
pub fn grid_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(55, 65, 81) // Gray 700
    } else {
        Color32::from_rgb(229, 231, 235) // Gray 200
    }
}

/// Apply dark/light visuals and the configured body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
            body.size = font_size;
        }
        if let Some(button) = style.text_styles.get_mut(&egui::TextStyle::Button) {
            button.size = font_size;
        }
    });
}

/// Layout constants.
pub const CHART_HEIGHT: f32 = 260.0;
pub const CARD_MIN_WIDTH: f32 = 150.0;
pub const ROW_HEIGHT: f32 = 56.0;
pub const MODAL_WIDTH: f32 = 440.0;
pub const BAR_ROUNDING: f32 = 3.0;
