/*!
 * Timecode parsing, formatting and interval arithmetic.
 *
 * Timecodes use the SRT `HH:MM:SS,mmm` format. All arithmetic is done on
 * millisecond offsets; formatting is an exact round trip for every
 * non-negative offset.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TimecodeError;

// @const: SRT timecode regex
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

/// Parse a `HH:MM:SS,mmm` timecode into milliseconds.
///
/// Malformed input is a caller error and is reported, not repaired.
pub fn parse_timecode(text: &str) -> Result<u64, TimecodeError> {
    let trimmed = text.trim();
    let caps = TIMECODE_REGEX
        .captures(trimmed)
        .ok_or_else(|| TimecodeError::Malformed(trimmed.to_string()))?;

    let field = |idx: usize| -> u64 {
        caps.get(idx).map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };

    let hours = field(1);
    let minutes = field(2);
    let seconds = field(3);
    let millis = field(4);

    if minutes >= 60 || seconds >= 60 {
        return Err(TimecodeError::Malformed(trimmed.to_string()));
    }

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Format milliseconds as a zero-padded `HH:MM:SS,mmm` timecode.
pub fn format_timecode(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Partition `[start_ms, end_ms]` into `n` contiguous ordered sub-ranges.
///
/// The step is `max(1, (end - start) / n)`; the last range's end is forced
/// to `end_ms` so the union of the ranges covers the interval exactly.
pub fn partition(start_ms: u64, end_ms: u64, n: usize) -> Vec<(u64, u64)> {
    if n == 0 {
        return Vec::new();
    }

    let span = end_ms.saturating_sub(start_ms);
    let step = (span / n as u64).max(1);

    let mut ranges = Vec::with_capacity(n);
    for i in 0..n as u64 {
        let sub_start = start_ms + i * step;
        let sub_end = if i == n as u64 - 1 {
            end_ms
        } else {
            start_ms + (i + 1) * step
        };
        ranges.push((sub_start, sub_end));
    }

    ranges
}
