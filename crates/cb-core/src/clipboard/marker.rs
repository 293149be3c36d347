//! Write-time timestamp embedded in rich-text payloads.
//!
//! The producer wraps resolved rich text in an element carrying the copy time.
//! Readers compare these markers to tell which replica was written last; the
//! moment a reader *observes* a replica says nothing about write order.

use regex::Regex;
use std::sync::OnceLock;

pub const COPIED_AT_ATTRIBUTE: &str = "data-clipbench-copied-at";

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"data-clipbench-copied-at\s*=\s*["']([^"']*)["']"#)
            .expect("copied-at marker regex is valid")
    })
}

/// Wraps `html` in the timestamp marker element.
pub fn wrap_with_copied_at(html: &str, copied_at_ms: i64) -> String {
    format!(r#"<div {COPIED_AT_ATTRIBUTE}="{copied_at_ms}">{html}</div>"#)
}

/// Extracts the epoch-millisecond timestamp from the first marker in `html`.
///
/// Returns `None` when the marker is missing or its value is not an integer.
pub fn parse_copied_at(html: &str) -> Option<i64> {
    let caps = marker_regex().captures(html)?;
    caps.get(1)?.as_str().trim().parse::<i64>().ok()
}
