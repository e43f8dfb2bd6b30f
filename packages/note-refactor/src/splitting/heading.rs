//! ATX heading line recognition.

use crate::config::HEADING_LINE;

/// Level of a heading line, or `None` for any other line.
///
/// Only `#` markers at the very start of the line count, followed by
/// whitespace or the end of the line.
#[must_use]
pub fn heading_level(line: &str) -> Option<u8> {
    let caps = HEADING_LINE.captures(line)?;
    // The marker is 1-6 ASCII '#' characters
    u8::try_from(caps.get(1)?.as_str().len()).ok()
}

/// Text of a heading line after its marker, trimmed.
#[must_use]
pub fn heading_text(line: &str) -> Option<&str> {
    let caps = HEADING_LINE.captures(line)?;
    Some(caps.get(2).map_or("", |m| m.as_str().trim()))
}

/// Shift a heading line up by `shift` levels, never above level 1.
///
/// Non-heading lines are returned unchanged.
#[must_use]
pub fn relevel(line: &str, shift: u8) -> String {
    match heading_level(line) {
        Some(level) if shift > 0 => {
            let new_level = level.saturating_sub(shift).max(1);
            let rest = &line[usize::from(level)..];
            format!("{}{rest}", "#".repeat(usize::from(new_level)))
        }
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("# Title"), Some(1));
        assert_eq!(heading_level("### Deep"), Some(3));
        assert_eq!(heading_level("###### Six"), Some(6));
        assert_eq!(heading_level("## "), Some(2));
        assert_eq!(heading_level("#\tTabbed"), Some(1));
        assert_eq!(heading_level("#"), Some(1));
    }

    #[test]
    fn test_not_headings() {
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("####### Seven"), None);
        assert_eq!(heading_level("Para # not"), None);
        assert_eq!(heading_level("  ## indented"), None);
        assert_eq!(heading_level(""), None);
    }

    #[test]
    fn test_heading_text() {
        assert_eq!(heading_text("## Sub heading  "), Some("Sub heading"));
        assert_eq!(heading_text("##   "), Some(""));
        assert_eq!(heading_text("plain"), None);
    }

    #[test]
    fn test_relevel() {
        assert_eq!(relevel("### Deep", 2), "# Deep");
        assert_eq!(relevel("## Sub", 1), "# Sub");
        assert_eq!(relevel("## Sub", 0), "## Sub");
        assert_eq!(relevel("# Top", 3), "# Top");
        assert_eq!(relevel("text", 2), "text");
    }
}
