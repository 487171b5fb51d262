// InternDesk - ui/panels/chart.rs
//
// Monthly "Added" bars plus the "Total" cumulative line on a shared axis.
// All geometry comes from core::chart::ChartLayout; this file only paints it
// and maps pointer hover back to a month column.

use crate::core::animation;
use crate::core::chart::{self, ChartLayout, Point, Rect, Size};
use crate::ui::theme;
use crate::util::constants::MONTHS_PER_YEAR;
use egui::{pos2, vec2, Align2, FontId, Stroke};

const TOOLTIP_PADDING: f32 = 6.0;

fn to_chart_rect(rect: egui::Rect) -> Rect {
    Rect {
        min: Point::new(rect.min.x, rect.min.y),
        max: Point::new(rect.max.x, rect.max.y),
    }
}

fn to_egui_rect(rect: &Rect) -> egui::Rect {
    egui::Rect::from_min_max(pos2(rect.min.x, rect.min.y), pos2(rect.max.x, rect.max.y))
}

fn to_pos(p: Point) -> egui::Pos2 {
    pos2(p.x, p.y)
}

/// Paint the chart for `months` at `elapsed` seconds into its animation.
/// Updates `hovered` from the pointer.
pub fn render(
    ui: &mut egui::Ui,
    months: &[u32; MONTHS_PER_YEAR],
    elapsed: f32,
    hovered: &mut Option<usize>,
    dark_mode: bool,
) {
    let size = vec2(ui.available_width(), theme::CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let layout = ChartLayout::compute(months, to_chart_rect(response.rect));
    let plot = to_egui_rect(&layout.plot);
    let label_font = FontId::proportional(11.0);
    let text_colour = ui.visuals().text_color();

    // Grid and axis labels.
    for tick in &layout.ticks {
        painter.line_segment(
            [pos2(plot.min.x, tick.y), pos2(plot.max.x, tick.y)],
            Stroke::new(1.0, theme::grid_colour(dark_mode)),
        );
        painter.text(
            pos2(plot.min.x - 6.0, tick.y),
            Align2::RIGHT_CENTER,
            tick.value.to_string(),
            label_font.clone(),
            theme::MUTED,
        );
    }
    for (month, point) in layout.points.iter().enumerate() {
        painter.text(
            pos2(point.x, plot.max.y + 4.0),
            Align2::CENTER_TOP,
            chart::month_label(month),
            label_font.clone(),
            theme::MUTED,
        );
    }

    // Hover band behind the bars.
    *hovered = response
        .hover_pos()
        .filter(|pos| plot.contains(*pos))
        .map(|pos| layout.column_at(pos.x));
    if let Some(month) = *hovered {
        let centre = layout.points[month].x;
        let half = layout.column_width() / 2.0;
        painter.rect_filled(
            egui::Rect::from_min_max(pos2(centre - half, plot.min.y), pos2(centre + half, plot.max.y)),
            0.0,
            theme::grid_colour(dark_mode).gamma_multiply(0.5),
        );
    }

    // Bars grow from the baseline, staggered by month.
    for bar in &layout.bars {
        let progress = animation::bar_progress(elapsed, bar.month);
        if bar.value == 0 || progress <= 0.0 {
            continue;
        }
        let full = to_egui_rect(&bar.rect);
        let top = full.max.y - full.height() * progress;
        let colour = if *hovered == Some(bar.month) {
            theme::ACCENT
        } else {
            theme::ACCENT.gamma_multiply(0.8)
        };
        painter.rect_filled(
            egui::Rect::from_min_max(pos2(full.min.x, top), full.max),
            theme::BAR_ROUNDING,
            colour,
        );
    }

    // Cumulative line, revealed segment by segment after the bars.
    let reveal = animation::line_reveal(elapsed, layout.segments.len());
    let line_stroke = Stroke::new(2.0, theme::LINE);
    if reveal.first().is_some_and(|r| *r > 0.0) {
        painter.circle_filled(to_pos(layout.points[0]), 3.0, theme::LINE);
    }
    for (idx, ((a, b), r)) in layout.segments.iter().zip(reveal.iter()).enumerate() {
        if *r <= 0.0 {
            continue;
        }
        let end = pos2(a.x + (b.x - a.x) * r, a.y + (b.y - a.y) * r);
        painter.line_segment([to_pos(*a), end], line_stroke);
        if *r >= 1.0 {
            painter.circle_filled(to_pos(layout.points[idx + 1]), 3.0, theme::LINE);
        }
    }

    if let Some(month) = *hovered {
        paint_tooltip(ui, &painter, &layout, month, text_colour);
    }

    // Legend.
    ui.horizontal(|ui| {
        ui.colored_label(theme::ACCENT, "\u{25a0} Added");
        ui.add_space(12.0);
        ui.colored_label(theme::LINE, "\u{2014} Total");
    });
}

fn paint_tooltip(
    ui: &egui::Ui,
    painter: &egui::Painter,
    layout: &ChartLayout,
    month: usize,
    text_colour: egui::Color32,
) {
    let text = format!(
        "{}\nAdded: {}\nTotal: {}",
        chart::month_label(month),
        layout.months[month],
        layout.cumulative[month]
    );
    let galley = painter.layout_no_wrap(text, FontId::proportional(12.0), text_colour);
    let box_size = galley.size() + vec2(TOOLTIP_PADDING * 2.0, TOOLTIP_PADDING * 2.0);
    let origin = layout.tooltip_origin(month, Size::new(box_size.x, box_size.y));
    let rect = egui::Rect::from_min_size(pos2(origin.x, origin.y), box_size);

    painter.rect_filled(rect, 4.0, ui.visuals().window_fill);
    painter.galley(
        rect.min + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING),
        galley,
        text_colour,
    );
}
