// Human-readable byte counts and uptime strings

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];
/// Label used once every unit in [`UNITS`] is exhausted; the value is not divided further.
const CEILING_UNIT: &str = "ZB";

/// Formats a byte count with 1024-based units and one decimal, e.g. `"3.4 MB"`.
/// Negative (and NaN) input is treated as zero.
pub fn format_bytes(bytes: f64) -> String {
    let mut value = if bytes.is_nan() { 0.0 } else { bytes.max(0.0) };
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} {}", value, CEILING_UNIT)
}

/// Formats a rate in bytes per second, e.g. `"1.5 KB/s"`.
pub fn format_rate(bytes_per_sec: f64) -> String {
    format!("{}/s", format_bytes(bytes_per_sec))
}

/// Formats whole seconds as `H:MM:SS`, prefixed with a day count once past 24h
/// (`"1 day, 2:03:04"`, `"3 days, 0:00:00"`).
pub fn format_uptime(total_secs: u64) -> String {
    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}
