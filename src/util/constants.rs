// InternDesk - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "InternDesk";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "InternDesk";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Portal API
// =============================================================================

/// Base URL used when neither the CLI nor config.toml provide one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";

/// Default request timeout for a single API call (seconds).
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;

/// Minimum configurable request timeout (seconds).
pub const MIN_API_TIMEOUT_SECS: u64 = 1;

/// Maximum configurable request timeout (seconds).
pub const MAX_API_TIMEOUT_SECS: u64 = 120;

/// Status string sent when an intern is removed from the roster.
pub const REJECTED_STATUS: &str = "rejected";

// =============================================================================
// Chart geometry
// =============================================================================

/// Number of columns in the monthly chart.
pub const MONTHS_PER_YEAR: usize = 12;

/// Fraction of a month column occupied by its bar.
pub const BAR_WIDTH_RATIO: f32 = 0.6;

/// Width reserved on the left of the plot for y-axis labels (points).
pub const AXIS_GUTTER_LEFT: f32 = 36.0;

/// Height reserved below the plot for month labels (points).
pub const AXIS_GUTTER_BOTTOM: f32 = 22.0;

/// Headroom above the plot so the topmost line point is not clipped (points).
pub const PLOT_PADDING_TOP: f32 = 8.0;

/// Vertical gap between a tooltip and the point it describes (points).
pub const TOOLTIP_GAP: f32 = 8.0;

/// Scale ceilings used when the largest charted value is below 10.
pub const SMALL_SCALE_STEPS: [u32; 4] = [1, 2, 5, 10];

// =============================================================================
// Animation timeline
// =============================================================================

/// Time for one bar to grow from zero to its target height (seconds).
pub const BAR_GROW_SECS: f32 = 0.6;

/// Delay between consecutive bars starting to grow (seconds).
pub const BAR_STAGGER_SECS: f32 = 0.05;

/// Time to reveal one cumulative line segment (seconds).
pub const SEGMENT_REVEAL_SECS: f32 = 0.08;

/// Time for the dashboard counters to count up to their value (seconds).
pub const COUNTER_ANIM_SECS: f32 = 1.0;

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of worker results applied by the UI update loop per frame.
pub const MAX_FETCH_MESSAGES_PER_FRAME: usize = 32;

/// Maximum number of alerts queued at once. Older alerts are dropped first.
pub const MAX_PENDING_ALERTS: usize = 8;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Maximum length of the removal reason accepted by the confirm dialog.
pub const MAX_REASON_LENGTH: usize = 500;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
