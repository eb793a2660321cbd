//! Duration parsing utilities.

use anyhow::Context;
use rlog_core::DurationSpec;
use std::time::Duration;

/// Parse a duration string like "1h", "30m", "300s", "300" into seconds.
/// Supports:
/// - Plain numbers (interpreted as seconds): "300"
/// - Seconds suffix: "300s"
/// - Minutes suffix: "30m"
/// - Hours suffix: "1h"
pub fn parse_duration_to_secs(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (num_str, multiplier, unit) = if let Some(num_str) = s.strip_suffix('h') {
        (num_str, 3600, "hours")
    } else if let Some(num_str) = s.strip_suffix('m') {
        (num_str, 60, "minutes")
    } else if let Some(num_str) = s.strip_suffix('s') {
        (num_str, 1, "seconds")
    } else {
        (s, 1, "duration")
    };

    let value: u64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid {unit} value: {num_str}"))?;
    value
        .checked_mul(multiplier)
        .with_context(|| format!("Duration too large: {s}"))
}

/// Convert a configured pattern run time into a [`Duration`].
pub fn to_duration(spec: &DurationSpec) -> anyhow::Result<Duration> {
    let secs = match spec {
        DurationSpec::Seconds(secs) => *secs,
        DurationSpec::Text(text) => parse_duration_to_secs(text)?,
    };
    Ok(Duration::from_secs(secs))
}
