// LogDash - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogDash";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LogDash";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Loading limits
// =============================================================================

/// Log files larger than this are refused outright.
pub const MAX_LOG_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MB

/// Default cap on the number of log entries held in memory at once.
///
/// Entries beyond the cap are dropped at load time and a warning is shown.
pub const DEFAULT_MAX_TOTAL_ENTRIES: usize = 1_000_000;

/// Smallest accepted value for `[loading] max_entries`.
pub const MIN_MAX_TOTAL_ENTRIES: usize = 1_000;

/// Hard upper bound for `[loading] max_entries`.
pub const ABSOLUTE_MAX_TOTAL_ENTRIES: usize = 5_000_000;

/// Maximum number of per-line load warnings kept for display.
/// Further failures are counted but not stored.
pub const MAX_LOAD_WARNINGS: usize = 1_000;

/// Maximum characters of an offending line quoted in a load warning.
pub const MAX_LINE_PREVIEW: usize = 120;

// =============================================================================
// Row rendering
// =============================================================================

/// chrono format for the collapsed-row timestamp: `Jan 15, 10:30:00`.
pub const ROW_TIMESTAMP_FORMAT: &str = "%b %d, %H:%M:%S";

/// Caption shown above the expanded metadata panel.
pub const METADATA_CAPTION: &str = "Metadata:";

// =============================================================================
// UI defaults
// =============================================================================

/// Default maximum height of the expanded metadata panel in points.
pub const DEFAULT_METADATA_MAX_HEIGHT: f32 = 240.0;

/// Lower bound for `[view] metadata_max_height`.
pub const MIN_METADATA_MAX_HEIGHT: f32 = 60.0;

/// Upper bound for `[view] metadata_max_height`.
pub const MAX_METADATA_MAX_HEIGHT: f32 = 1_200.0;

/// Default body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Minimum configurable font size.
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum configurable font size.
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Maximum number of warnings retained in application state.
pub const MAX_WARNINGS: usize = 1_000;

// =============================================================================
// Export
// =============================================================================

/// Hard cap on entries written by a single export.
pub const MAX_EXPORT_ENTRIES: usize = 5_000_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// File names
// =============================================================================

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File extensions offered by the open dialog.
pub const LOG_FILE_EXTENSIONS: &[&str] = &["json", "jsonl", "ndjson", "log"];
