//! Date rendering for exported records.
//!
//! Both forms start from the canonical UTC description of an instant
//! (`2025-03-20 15:04:05 +0000`), cut it at the UTC offset marker, and the
//! simple form then trims three more trailing characters. The trim is
//! textual: it is not aware of which field it removes.

use chrono::{DateTime, Utc};

const UTC_OFFSET_MARKER: &str = " +0000";
const SIMPLE_TRIM_CHARS: usize = 3;

/// Canonical description of an instant, always rendered in UTC.
pub fn canonical_description(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S %z").to_string()
}

/// Full form: the canonical description up to the UTC offset marker.
pub fn format_full(date: &DateTime<Utc>) -> String {
    truncate_at_offset(&canonical_description(date)).to_string()
}

/// Simple form: the full form with its last three characters dropped.
pub fn format_simple(date: &DateTime<Utc>) -> String {
    drop_last_chars(&format_full(date), SIMPLE_TRIM_CHARS).to_string()
}

fn truncate_at_offset(description: &str) -> &str {
    match description.find(UTC_OFFSET_MARKER) {
        Some(idx) => &description[..idx],
        None => description,
    }
}

fn drop_last_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[..idx],
        None => "",
    }
}
