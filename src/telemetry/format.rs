//! Human-readable byte formatting.

const RATE_UNITS: [&str; 4] = ["B/s", "KB/s", "MB/s", "GB/s"];
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

fn scale(mut value: f64, units: usize) -> (f64, usize) {
    let mut exponent = 0;
    while value >= 1024.0 && exponent < units - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    (value, exponent)
}

/// Trims a fixed-precision number's trailing zeros (`"1.50"` → `"1.5"`).
fn trimmed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Formats a transfer rate: `0 B/s`, `512 B/s`, `1.5 KB/s`, `2 MB/s`.
pub fn format_bytes(bytes_per_sec: f64) -> String {
    if !bytes_per_sec.is_finite() || bytes_per_sec <= 0.0 {
        return "0 B/s".to_string();
    }
    let (value, exponent) = scale(bytes_per_sec, RATE_UNITS.len());
    format!("{} {}", trimmed(value, 1), RATE_UNITS[exponent])
}

/// Formats a byte count with up to two decimals: `0 B`, `1.25 KB`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let (value, exponent) = scale(bytes as f64, SIZE_UNITS.len());
    format!("{} {}", trimmed(value, 2), SIZE_UNITS[exponent])
}
