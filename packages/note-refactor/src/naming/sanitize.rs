//! File-name sanitization.

use unicode_normalization::UnicodeNormalization;

use crate::config::{DEFAULT_NOTE_NAME, MAX_NAME_BYTES};
use crate::splitting::heading_text;

/// Characters that become `-` (path separators and drive/stream markers).
const SEPARATOR_CHARS: &[char] = &['/', '\\', ':'];

/// Characters dropped because they break wiki links or are illegal on
/// common filesystems.
const REMOVED_CHARS: &[char] = &['#', '^', '[', ']', '|', '*', '"', '<', '>', '?'];

/// Turn arbitrary text into a safe note name.
///
/// Empty results fall back to [`fallback_name`] with `fallback_index`.
///
/// # Examples
/// ```
/// use note_refactor::naming::sanitize;
///
/// assert_eq!(sanitize("Foo/Bar", 0), "Foo-Bar");
/// assert_eq!(sanitize("## Meeting [notes]", 0), "Meeting notes");
/// assert_eq!(sanitize("  ###  ", 3), "Untitled 3");
/// ```
#[must_use]
pub fn sanitize(raw: &str, fallback_index: usize) -> String {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        tracing::debug!(raw, fallback_index, "Name sanitized to nothing, using fallback");
        fallback_name(fallback_index)
    } else {
        cleaned
    }
}

/// Deterministic name for text that sanitizes to nothing.
#[must_use]
pub fn fallback_name(index: usize) -> String {
    if index == 0 {
        DEFAULT_NOTE_NAME.to_string()
    } else {
        format!("{DEFAULT_NOTE_NAME} {index}")
    }
}

/// Strip a leading heading marker, leaving other text untouched.
#[must_use]
pub(crate) fn strip_heading_marker(raw: &str) -> &str {
    heading_text(raw).unwrap_or(raw)
}

fn clean(raw: &str) -> String {
    let filtered: String = strip_heading_marker(raw)
        .nfc()
        .filter_map(|c| match c {
            c if SEPARATOR_CHARS.contains(&c) => Some('-'),
            c if REMOVED_CHARS.contains(&c) => None,
            c if c.is_control() => Some(' '),
            c => Some(c),
        })
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    // Leading dots hide files; trailing dots are dropped on Windows
    let trimmed = collapsed.trim_start_matches('.').trim_end_matches('.').trim();

    truncate_bytes(trimmed, MAX_NAME_BYTES).trim_end().to_string()
}

/// Longest prefix of `s` that fits in `max` bytes, cut on a char boundary.
fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
