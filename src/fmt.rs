//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Wrench emoji for setup operations
pub const WRENCH: Emoji = Emoji("🔧", "*");

/// Hammer emoji for build operations
pub const HAMMER: Emoji = Emoji("🔨", ">");

/// Chart emoji for the comparison table
pub const CHART: Emoji = Emoji("📊", "~");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Sparkles emoji for cleanup/completion
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Format a byte count as a human-readable size string.
///
/// Units are decimal, matching the build tool's own output: 1 KB = 1000 B,
/// 1 MB = 1,000,000 B. Negative values (size deltas) never reach a unit tier
/// and render as raw bytes.
///
/// # Examples
///
/// ```
/// use bundle_delta::fmt::humanize;
///
/// assert_eq!(humanize(500), "500 B");
/// assert_eq!(humanize(1500), "1.50 KB");
/// assert_eq!(humanize(2_500_000), "2.50 MB");
/// assert_eq!(humanize(-50), "-50 B");
/// ```
pub fn humanize(bytes: i64) -> String {
    const KB: i64 = 1000;
    const MB: i64 = KB * 1000;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Prefix a formatted delta with `+` unless it is negative or zero.
///
/// The test is textual on purpose: a delta already rendered as `"-50 B"` or
/// `"0 B"` stays untouched, anything else gains a leading `+`.
///
/// # Examples
///
/// ```
/// use bundle_delta::fmt::prefix_delta;
///
/// assert_eq!(prefix_delta("50 B"), "+50 B");
/// assert_eq!(prefix_delta("-50 B"), "-50 B");
/// assert_eq!(prefix_delta("0 B"), "0 B");
/// ```
pub fn prefix_delta(delta: &str) -> String {
    if delta.starts_with('-') || delta.starts_with("0 ") {
        delta.to_string()
    } else {
        format!("+{}", delta)
    }
}

/// Render a measured build duration, always whole seconds.
pub fn approx_seconds(secs: u64) -> String {
    format!("~{} S", secs)
}

/// Render a signed build-duration delta in whole seconds.
pub fn delta_seconds(secs: i64) -> String {
    format!("{} S", secs)
}
