// InternDesk - core/animation.rs
//
// Animation timeline for the dashboard, as pure functions of elapsed time.
//
// The UI stores only the instant an animation started; every frame it asks
// this module how far each element has progressed. Keeping the clock math
// here means the renderer holds no timers of its own and the timeline can
// be tested with plain numbers.
//
// Timeline (seconds since start):
//   bars      i-th bar grows over [i*BAR_STAGGER, i*BAR_STAGGER + BAR_GROW]
//   line      starts when the last bar finishes; segments reveal one after
//             another, SEGMENT_REVEAL each
//   counters  count up over [0, COUNTER_ANIM]

use crate::core::model::CompanyStats;
use crate::util::constants::{
    BAR_GROW_SECS, BAR_STAGGER_SECS, COUNTER_ANIM_SECS, MONTHS_PER_YEAR, SEGMENT_REVEAL_SECS,
};

/// Cubic ease-out on `t` in [0, 1]; out-of-range input is clamped.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Linear progress of a window `[start, start + duration]` at `elapsed`.
fn window_progress(elapsed: f32, start: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= start { 1.0 } else { 0.0 };
    }
    ((elapsed - start) / duration).clamp(0.0, 1.0)
}

/// Eased height fraction (0 -> 1) of bar `index`.
pub fn bar_progress(elapsed: f32, index: usize) -> f32 {
    let start = index as f32 * BAR_STAGGER_SECS;
    ease_out_cubic(window_progress(elapsed, start, BAR_GROW_SECS))
}

/// Time at which the last bar reaches full height.
pub fn bars_finished_at() -> f32 {
    (MONTHS_PER_YEAR.saturating_sub(1)) as f32 * BAR_STAGGER_SECS + BAR_GROW_SECS
}

/// Draw fraction of each cumulative-line segment.
///
/// Segment `i` only starts once segment `i - 1` is fully drawn.
pub fn line_reveal(elapsed: f32, segment_count: usize) -> Vec<f32> {
    let line_start = bars_finished_at();
    (0..segment_count)
        .map(|i| {
            window_progress(
                elapsed,
                line_start + i as f32 * SEGMENT_REVEAL_SECS,
                SEGMENT_REVEAL_SECS,
            )
        })
        .collect()
}

/// Whether the whole chart timeline has finished.
pub fn is_complete(elapsed: f32, segment_count: usize) -> bool {
    elapsed >= bars_finished_at() + segment_count as f32 * SEGMENT_REVEAL_SECS
}

/// Counter value shown `elapsed` seconds into the count-up.
/// Reaches exactly `target` at the end.
pub fn animate_count(target: u32, elapsed: f32) -> u32 {
    let t = ease_out_cubic(window_progress(elapsed, 0.0, COUNTER_ANIM_SECS));
    if t >= 1.0 {
        return target;
    }
    (target as f32 * t).round() as u32
}

/// Snapshot of the dashboard counters mid-animation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatedStats {
    pub total_interns: u32,
    pub present_today: u32,
    pub late_today: u32,
    pub absent_today: u32,
    pub attendance_rate: f32,
}

impl AnimatedStats {
    /// Interpolate every counter of `target` at `elapsed`.
    pub fn at(target: &CompanyStats, elapsed: f32) -> Self {
        let t = ease_out_cubic(window_progress(elapsed, 0.0, COUNTER_ANIM_SECS));
        Self {
            total_interns: animate_count(target.total_interns, elapsed),
            present_today: animate_count(target.present_today, elapsed),
            late_today: animate_count(target.late_today, elapsed),
            absent_today: animate_count(target.absent_today, elapsed),
            attendance_rate: target.attendance_rate * t,
        }
    }

    /// Whether the count-up has finished.
    pub fn is_settled(elapsed: f32) -> bool {
        elapsed >= COUNTER_ANIM_SECS
    }
}
