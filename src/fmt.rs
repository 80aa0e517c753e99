//! Shared formatting utilities for sizes, runtimes, deltas and console output

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for ML-predicted results
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for analysis/inspection
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Trophy emoji for the overall winner
pub const TROPHY: Emoji = Emoji("🏆", "#");

/// Package emoji for binary size sections
pub const PACKAGE: Emoji = Emoji("📦", "=");

/// Lightning emoji for runtime sections
pub const LIGHTNING: Emoji = Emoji("⚡", "=");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use iris_cli::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a runtime given in seconds as milliseconds
///
/// ```
/// use iris_cli::fmt::format_runtime;
///
/// assert_eq!(format_runtime(0.01234), "12.34 ms");
/// ```
pub fn format_runtime(seconds: f64) -> String {
    format!("{:.2} ms", seconds * 1000.0)
}

/// Format a signed percentage delta with a direction arrow
///
/// Negative deltas are improvements and point down.
///
/// ```
/// use iris_cli::fmt::format_delta;
///
/// assert_eq!(format_delta(-12.345), "↓ 12.3%");
/// assert_eq!(format_delta(4.0), "↑ 4.0%");
/// ```
pub fn format_delta(percent: f64) -> String {
    let arrow = if percent < 0.0 { "↓" } else { "↑" };
    format!("{} {:.1}%", arrow, percent.abs())
}

/// Format milliseconds of backend processing time as seconds
pub fn format_processing_time(ms: f64) -> String {
    format!("{:.2}s", ms / 1000.0)
}
