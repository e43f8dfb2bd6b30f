//! Moment-style date formats rendered with chrono.
//!
//! Users write formats like `YYYY-MM-DD HH:mm` in templates and file-name
//! prefixes. Each token is translated to its chrono equivalent; text in
//! square brackets is copied literally.

use chrono::NaiveDateTime;

/// Tokens in longest-first order so `MMMM` wins over `MM`.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("M", "%-m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("DD", "%d"),
    ("D", "%-d"),
    ("HH", "%H"),
    ("H", "%-H"),
    ("hh", "%I"),
    ("h", "%-I"),
    ("mm", "%M"),
    ("m", "%-M"),
    ("ss", "%S"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
    ("X", "%s"),
];

/// Translate a moment-style format to a chrono format string.
fn to_chrono_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest.find(']') {
                push_literal(&mut out, &rest[1..close]);
                rest = &rest[close + 1..];
                continue;
            }
        }

        if let Some((token, chrono)) = TOKENS.iter().find(|(token, _)| rest.starts_with(token)) {
            out.push_str(chrono);
            rest = &rest[token.len()..];
            continue;
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, literal: &str) {
    out.push_str(&literal.replace('%', "%%"));
}

/// Render `now` with a moment-style format.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use note_refactor::template::format_date;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .and_then(|d| d.and_hms_opt(14, 5, 0))
///     .unwrap();
/// assert_eq!(format_date(now, "YYYYMMDDHHmm"), "202403091405");
/// assert_eq!(format_date(now, "[Week of] MMM D"), "Week of Mar 9");
/// ```
#[must_use]
pub fn format_date(now: NaiveDateTime, format: &str) -> String {
    now.format(&to_chrono_format(format)).to_string()
}
