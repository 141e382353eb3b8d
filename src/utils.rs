//! Parsing helpers for the resolution and bandwidth CLI inputs.

use crate::error::{ClientError, Result};
use regex::Regex;

/// Bits per second in one megabit per second.
pub const BITS_PER_MEGABIT: u64 = 1_000_000;

/// Split a `<height>x<width>` string into its height and width parts.
///
/// Only the first two segments are used; anything after a second `x` is ignored.
pub fn parse_resolution(resolution: &str) -> Result<(String, String)> {
    let mut parts = resolution.split('x');
    match (parts.next(), parts.next()) {
        (Some(height), Some(width)) => Ok((height.to_string(), width.to_string())),
        _ => Err(ClientError::InvalidResolution {
            input: resolution.to_string(),
        }),
    }
}

/// Convert a megabit bandwidth such as `"5Mbps"` to bits per second.
///
/// Every non-digit is stripped before parsing, so `"12.5Mbps"` reads as 125.
pub fn parse_bandwidth(bandwidth: &str) -> Result<u64> {
    let invalid = |reason: String| ClientError::InvalidBandwidth {
        input: bandwidth.to_string(),
        reason,
    };

    let re = Regex::new(r"[^0-9]+").map_err(|e| invalid(e.to_string()))?;
    let digits = re.replace_all(bandwidth, "");

    if digits.is_empty() {
        return Err(invalid("no numeric value found".to_string()));
    }

    let megabits: u64 = digits
        .parse()
        .map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;

    megabits
        .checked_mul(BITS_PER_MEGABIT)
        .ok_or_else(|| invalid("value is too large".to_string()))
}
