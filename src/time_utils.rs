//! Conversions between run durations in seconds and `MM:SS` text.
//!
//! The conversions never fail: bad input degrades to zero so a form can
//! echo whatever is being typed. Use [`validate_time_string`] before
//! accepting a value.

use once_cell::sync::Lazy;
use regex::Regex;

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+:[0-5][0-9]$").expect("time pattern is valid"));

/// Formats `seconds` as `M:SS`. Minutes are not wrapped at 60.
pub fn seconds_to_time_string(seconds: i64) -> String {
    if seconds <= 0 {
        return "0:00".to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Parses `M:SS` into seconds. Anything without exactly one `:` is 0, and
/// each side is read like a lenient integer parse (leading digits only).
pub fn time_string_to_seconds(text: &str) -> i64 {
    if text.trim().is_empty() {
        return 0;
    }

    let mut parts = text.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };

    leading_int(minutes)
        .saturating_mul(60)
        .saturating_add(leading_int(seconds))
}

pub fn validate_time_string(text: &str) -> bool {
    if !TIME_PATTERN.is_match(text) {
        return false;
    }
    text.split_once(':')
        .and_then(|(_, seconds)| seconds.parse::<u32>().ok())
        .is_some_and(|seconds| seconds <= 59)
}

fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative { -value } else { value }
}
