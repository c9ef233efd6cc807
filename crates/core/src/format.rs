//! Display helpers shared by the console views.

use crate::types::Timestamp;

/// Shown for an automation without a description.
pub const NO_DESCRIPTION: &str = "No description set.";

const UNITS: [&str; 4] = ["k", "M", "G", "T"];

/// Compact count: `999`, `1.2k`, `100.0k`, `1.0M`.
///
/// The unit is chosen after rounding to one decimal, so a value never
/// shows as `1000.0` of a smaller unit.
pub fn compact_number(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut value = n as f64 / 1000.0;
    let mut unit = 0;
    while (value * 10.0).round() >= 10_000.0 && unit + 1 < UNITS.len() {
        value /= 1000.0;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}

/// Count with thousands separators: `1,234,567`.
pub fn grouped_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `count / limit Quota` in compact form.
pub fn quota_label(count: u64, limit: u64) -> String {
    format!("{} / {} Quota", compact_number(count), compact_number(limit))
}

/// `N events`, as shown above the run history.
pub fn event_count_label(n: usize) -> String {
    if n == 1 {
        "1 event".to_string()
    } else {
        format!("{} events", grouped_number(n as u64))
    }
}

/// Container name as a navigation label: `hostnames` -> `Hostnames`.
pub fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Row timestamp, `yy-MM-dd HH:mm:ss`.
pub fn short_timestamp(ts: &Timestamp) -> String {
    ts.format("%y-%m-%d %H:%M:%S").to_string()
}

pub fn description_or_default(description: &str) -> &str {
    if description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        description
    }
}
