// InternDesk - core/chart.rs
//
// Geometry for the monthly "added vs cumulative" combo chart.
//
// Pure layout: takes per-month counts plus the outer drawing rect and
// returns every position the renderer needs (bar rects, line points,
// axis ticks, tooltip placement). The egui shell in ui/panels/chart.rs
// only paints what this module computes, so all of the pixel math is
// unit-tested here without a rendering environment.

use crate::util::constants::{
    AXIS_GUTTER_BOTTOM, AXIS_GUTTER_LEFT, BAR_WIDTH_RATIO, MONTHS_PER_YEAR, PLOT_PADDING_TOP,
    SMALL_SCALE_STEPS, TOOLTIP_GAP,
};

const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Geometry primitives
// =============================================================================

/// A 2D point in screen coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_size(min: Point, size: Size) -> Self {
        Self {
            min,
            max: Point::new(min.x + size.width, min.y + size.height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when `other` lies entirely inside `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

// =============================================================================
// Series math
// =============================================================================

/// Pad (with zeros) or truncate `values` to exactly one value per month.
pub fn normalize_months(values: &[u32]) -> [u32; MONTHS_PER_YEAR] {
    let mut months = [0u32; MONTHS_PER_YEAR];
    for (slot, value) in months.iter_mut().zip(values.iter()) {
        *slot = *value;
    }
    months
}

/// Running total in month order.
pub fn cumulative(months: &[u32; MONTHS_PER_YEAR]) -> [u32; MONTHS_PER_YEAR] {
    let mut out = [0u32; MONTHS_PER_YEAR];
    let mut total: u32 = 0;
    for (slot, value) in out.iter_mut().zip(months.iter()) {
        total = total.saturating_add(*value);
        *slot = total;
    }
    out
}

/// Round a series maximum up to a "nice" scale ceiling.
///
/// - 0 is floored to 1 so bar heights never divide by zero.
/// - Below 10 the ceiling snaps to the next of `SMALL_SCALE_STEPS` (1, 2, 5, 10).
/// - From 10 upwards the leading digit is rounded up at its power of ten
///   (23 -> 30, 130 -> 200, 1000 -> 1000).
///
/// The result is always >= `max`.
pub fn nice_ceiling(max: u32) -> u32 {
    if max == 0 {
        return 1;
    }
    if max < 10 {
        return SMALL_SCALE_STEPS
            .iter()
            .copied()
            .find(|&step| step >= max)
            .unwrap_or(10);
    }

    let max = u64::from(max);
    let magnitude = power_of_ten_floor(max);
    let ceiling = max.div_ceil(magnitude) * magnitude;
    u32::try_from(ceiling).unwrap_or(u32::MAX)
}

/// Largest power of ten that is <= `value` (value must be >= 1).
fn power_of_ten_floor(value: u64) -> u64 {
    let mut magnitude = 1u64;
    while magnitude * 10 <= value {
        magnitude *= 10;
    }
    magnitude
}

/// Axis label values from 0 to `ceiling` inclusive, evenly spaced.
///
/// Picks the smallest 1/2/5 x 10^n step that divides the ceiling into at
/// most six intervals, relaxing to ten before giving up and labelling only
/// the two ends.
pub fn axis_ticks(ceiling: u32) -> Vec<u32> {
    let ceiling = ceiling.max(1);
    let step = tick_step(ceiling);
    (0..=ceiling / step).map(|i| i * step).collect()
}

fn tick_step(ceiling: u32) -> u32 {
    for max_intervals in [6u32, 10] {
        let mut power = 1u32;
        loop {
            for mult in [1u32, 2, 5] {
                let Some(step) = power.checked_mul(mult) else {
                    break;
                };
                if step > ceiling {
                    break;
                }
                if ceiling % step == 0 && ceiling / step <= max_intervals {
                    return step;
                }
            }
            match power.checked_mul(10) {
                Some(next) if next <= ceiling => power = next,
                _ => break,
            }
        }
    }
    ceiling
}

/// Three-letter month label for a zero-based month index.
pub fn month_label(month: usize) -> &'static str {
    MONTH_LABELS.get(month).copied().unwrap_or("?")
}

// =============================================================================
// Layout
// =============================================================================

/// Geometry of one month's bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    /// Zero-based month index.
    pub month: usize,
    /// Raw count for the month.
    pub value: u32,
    /// Full-height bar rect (before animation scaling).
    pub rect: Rect,
}

/// A horizontal axis label position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTick {
    pub value: u32,
    pub y: f32,
}

/// Complete chart geometry for one data set and one drawing rect.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Outer drawing rect the chart (and its tooltips) must stay inside.
    pub bounds: Rect,
    /// Inner plot rect after axis gutters.
    pub plot: Rect,
    /// Raw per-month counts (zero-padded).
    pub months: [u32; MONTHS_PER_YEAR],
    /// Running totals.
    pub cumulative: [u32; MONTHS_PER_YEAR],
    /// Shared vertical scale for both series.
    pub scale_max: u32,
    pub bars: Vec<BarGeometry>,
    /// Cumulative-line vertices, one per month at the column centre.
    pub points: Vec<Point>,
    /// Consecutive point pairs; `points.len() - 1` entries.
    pub segments: Vec<(Point, Point)>,
    pub ticks: Vec<AxisTick>,
}

impl ChartLayout {
    /// Compute the layout of `values` inside `bounds`.
    pub fn compute(values: &[u32], bounds: Rect) -> Self {
        let months = normalize_months(values);
        let cumulative = cumulative(&months);

        let true_max = months
            .iter()
            .chain(cumulative.iter())
            .copied()
            .max()
            .unwrap_or(0);
        let scale_max = nice_ceiling(true_max);

        let plot = plot_rect(bounds);
        let column_width = plot.width() / MONTHS_PER_YEAR as f32;
        let bar_width = column_width * BAR_WIDTH_RATIO;
        let plot_height = plot.height();
        let scale = scale_max as f32;

        let y_for = |value: u32| plot.max.y - (value as f32 / scale) * plot_height;

        let mut bars = Vec::with_capacity(MONTHS_PER_YEAR);
        let mut points = Vec::with_capacity(MONTHS_PER_YEAR);
        for month in 0..MONTHS_PER_YEAR {
            let centre_x = plot.min.x + column_width * (month as f32 + 0.5);
            let value = months[month];
            bars.push(BarGeometry {
                month,
                value,
                rect: Rect {
                    min: Point::new(centre_x - bar_width / 2.0, y_for(value)),
                    max: Point::new(centre_x + bar_width / 2.0, plot.max.y),
                },
            });
            points.push(Point::new(centre_x, y_for(cumulative[month])));
        }

        let segments = points.windows(2).map(|w| (w[0], w[1])).collect();

        let ticks = axis_ticks(scale_max)
            .into_iter()
            .map(|value| AxisTick {
                value,
                y: y_for(value),
            })
            .collect();

        Self {
            bounds,
            plot,
            months,
            cumulative,
            scale_max,
            bars,
            points,
            segments,
            ticks,
        }
    }

    /// Width of one month column in the plot.
    pub fn column_width(&self) -> f32 {
        self.plot.width() / MONTHS_PER_YEAR as f32
    }

    /// Map a horizontal coordinate to the nearest month column.
    ///
    /// Coordinates left or right of the plot clamp to the first or last month.
    pub fn column_at(&self, x: f32) -> usize {
        let width = self.column_width();
        if width <= 0.0 || !x.is_finite() {
            return 0;
        }
        let raw = ((x - self.plot.min.x) / width).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(MONTHS_PER_YEAR - 1)
        }
    }

    /// The point a month's tooltip hangs from: the column centre at
    /// whichever is higher on screen, the bar top or the line vertex.
    pub fn anchor(&self, month: usize) -> Point {
        let month = month.min(MONTHS_PER_YEAR - 1);
        let point = self.points[month];
        let bar_top = self.bars[month].rect.min.y;
        Point::new(point.x, point.y.min(bar_top))
    }

    /// Top-left corner of a tooltip of `size` for `month`.
    ///
    /// The tooltip is centred above the anchor, flipped below it when there
    /// is no room above, and clamped so it stays inside `bounds`. A tooltip
    /// larger than the bounds is pinned to the top-left corner.
    pub fn tooltip_origin(&self, month: usize, size: Size) -> Point {
        let anchor = self.anchor(month);

        let x = clamp_span(
            anchor.x - size.width / 2.0,
            self.bounds.min.x,
            self.bounds.max.x - size.width,
        );

        let above = anchor.y - TOOLTIP_GAP - size.height;
        let y = if above >= self.bounds.min.y {
            above
        } else {
            anchor.y + TOOLTIP_GAP
        };
        let y = clamp_span(y, self.bounds.min.y, self.bounds.max.y - size.height);

        Point::new(x, y)
    }
}

/// Inner plot area of `bounds` after reserving axis gutters.
fn plot_rect(bounds: Rect) -> Rect {
    let min = Point::new(
        bounds.min.x + AXIS_GUTTER_LEFT,
        bounds.min.y + PLOT_PADDING_TOP,
    );
    let max = Point::new(
        bounds.max.x.max(min.x),
        (bounds.max.y - AXIS_GUTTER_BOTTOM).max(min.y),
    );
    Rect { min, max }
}

/// Clamp `value` into `[lo, hi]`; when the span is inverted `lo` wins.
fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    if hi < lo {
        lo
    } else {
        value.max(lo).min(hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_size(Point::new(0.0, 0.0), Size::new(636.0, 280.0))
    }

    #[test]
    fn test_all_zero_series_is_flat_without_dividing_by_zero() {
        let layout = ChartLayout::compute(&[0; 12], bounds());
        assert_eq!(layout.scale_max, 1);
        for bar in &layout.bars {
            assert_eq!(bar.rect.height(), 0.0);
        }
        for point in &layout.points {
            assert_eq!(point.y, layout.plot.max.y);
            assert!(point.y.is_finite());
        }
        assert_eq!(layout.cumulative, [0; 12]);
    }

    #[test]
    fn test_cumulative_runs_in_month_order() {
        let months = normalize_months(&[1, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(cumulative(&months), [1, 3, 6, 6, 6, 6, 6, 6, 6, 6, 6, 6]);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let layout = ChartLayout::compute(&[4, 1], bounds());
        assert_eq!(layout.months, [4, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(layout.cumulative[11], 5);
        assert_eq!(layout.bars.len(), 12);
        assert_eq!(layout.points.len(), 12);
        assert_eq!(layout.segments.len(), 11);
    }

    #[test]
    fn test_nice_ceiling_small_and_large_rules() {
        assert_eq!(nice_ceiling(0), 1);
        assert_eq!(nice_ceiling(1), 1);
        assert_eq!(nice_ceiling(3), 5);
        assert_eq!(nice_ceiling(7), 10);
        assert_eq!(nice_ceiling(10), 10);
        assert_eq!(nice_ceiling(11), 20);
        assert_eq!(nice_ceiling(23), 30);
        assert_eq!(nice_ceiling(130), 200);
        assert_eq!(nice_ceiling(1000), 1000);
        assert_eq!(nice_ceiling(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_nice_ceiling_never_below_max() {
        for max in 0..5_000u32 {
            assert!(nice_ceiling(max) >= max, "ceiling below max for {max}");
        }
    }

    #[test]
    fn test_scale_covers_both_series() {
        // Raw max is 3 but the cumulative series peaks at 6.
        let layout = ChartLayout::compute(&[1, 2, 3], bounds());
        assert_eq!(layout.scale_max, 10);
        let top = layout.points.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!(top >= layout.plot.min.y);
    }

    #[test]
    fn test_bar_heights_scale_linearly() {
        let layout = ChartLayout::compute(&[5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], bounds());
        // cumulative max is 5, scale ceiling is 5: the January bar fills the plot.
        assert_eq!(layout.scale_max, 5);
        let full = layout.plot.height();
        assert!((layout.bars[0].rect.height() - full).abs() < 1e-3);
        assert_eq!(layout.bars[1].rect.height(), 0.0);
    }

    #[test]
    fn test_axis_ticks_span_zero_to_ceiling() {
        assert_eq!(axis_ticks(1), vec![0, 1]);
        assert_eq!(axis_ticks(5), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(axis_ticks(10), vec![0, 2, 4, 6, 8, 10]);
        assert_eq!(axis_ticks(200), vec![0, 50, 100, 150, 200]);
        let ticks = axis_ticks(900);
        assert_eq!(ticks.first(), Some(&0));
        assert_eq!(ticks.last(), Some(&900));
    }

    #[test]
    fn test_column_at_clamps_to_first_and_last_month() {
        let layout = ChartLayout::compute(&[1; 12], bounds());
        assert_eq!(layout.column_at(-50.0), 0);
        assert_eq!(layout.column_at(layout.plot.min.x + 1.0), 0);
        assert_eq!(layout.column_at(10_000.0), 11);
        let mid_march = layout.plot.min.x + layout.column_width() * 2.5;
        assert_eq!(layout.column_at(mid_march), 2);
    }

    #[test]
    fn test_tooltip_stays_inside_bounds_at_both_edges() {
        let layout = ChartLayout::compute(&[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8], bounds());
        let size = Size::new(140.0, 48.0);
        for month in [0usize, 11] {
            let origin = layout.tooltip_origin(month, size);
            let rect = Rect::from_min_size(origin, size);
            assert!(
                layout.bounds.contains_rect(&rect),
                "tooltip for month {month} escapes bounds: {rect:?}"
            );
        }
    }

    #[test]
    fn test_tooltip_flips_below_when_no_room_above() {
        // A single large January value puts its anchor at the very top.
        let layout = ChartLayout::compute(&[10], bounds());
        let size = Size::new(100.0, 40.0);
        let origin = layout.tooltip_origin(0, size);
        assert!(origin.y > layout.anchor(0).y);
    }

    #[test]
    fn test_tooltip_larger_than_bounds_is_pinned() {
        let tiny = Rect::from_min_size(Point::new(10.0, 10.0), Size::new(60.0, 40.0));
        let layout = ChartLayout::compute(&[1, 2], tiny);
        let origin = layout.tooltip_origin(5, Size::new(200.0, 100.0));
        assert_eq!(origin, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_degenerate_bounds_do_not_panic() {
        let empty = Rect::default();
        let layout = ChartLayout::compute(&[1, 2, 3], empty);
        assert_eq!(layout.column_at(5.0), 0);
        assert!(layout.plot.width() >= 0.0);
        assert!(layout.plot.height() >= 0.0);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(0), "Jan");
        assert_eq!(month_label(11), "Dec");
        assert_eq!(month_label(12), "?");
    }
}
