//! Composition of a new note's body from an extracted block.

use crate::config::Settings;
use crate::splitting::{heading_level, relevel};

/// Options controlling how a block becomes note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Emit the header as a heading in `heading_format`.
    pub include_first_line_as_heading: bool,

    /// Drop the header from the content.
    pub exclude_first_line: bool,

    /// Re-level headings so the shallowest becomes level 1.
    pub normalize_header_levels: bool,

    /// Heading marker used with `include_first_line_as_heading`.
    pub heading_format: String,

    /// The header is ordinary content, not a title.
    pub content_only: bool,
}

impl ComposeOptions {
    /// Options taken from user settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            include_first_line_as_heading: settings.include_first_line_as_note_heading,
            exclude_first_line: settings.exclude_first_line_in_note,
            normalize_header_levels: settings.normalize_header_levels,
            heading_format: settings.heading_format.clone(),
            content_only: false,
        }
    }

    /// Treat the header as content.
    #[must_use]
    pub fn with_content_only(mut self, content_only: bool) -> Self {
        self.content_only = content_only;
        self
    }
}

/// Assemble the content of a new note.
///
/// The header is emitted verbatim unless the options format it as a
/// heading or exclude it. Content-only blocks always keep the header
/// verbatim. Lines are joined with `\n` and nothing is trimmed.
#[must_use]
pub fn compose(header: &str, body: &[String], options: &ComposeOptions) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(body.len() + 1);

    if options.content_only {
        lines.push(header.to_string());
    } else if options.include_first_line_as_heading {
        lines.push(format_heading(header, &options.heading_format));
    } else if !options.exclude_first_line {
        lines.push(header.to_string());
    }

    lines.extend(body.iter().cloned());

    if options.normalize_header_levels {
        lines = normalize_heading_levels(&lines);
    }

    lines.join("\n")
}

/// Format a first line as a heading, dropping any leading markup such as
/// an existing heading marker or list bullet.
fn format_heading(header: &str, heading_format: &str) -> String {
    let baseline = header
        .trim_start_matches(|c: char| !(c.is_alphanumeric() || c == '_' || c.is_whitespace()))
        .trim();
    format!("{heading_format} {baseline}").trim().to_string()
}

/// Shift all headings so the shallowest present becomes level 1.
fn normalize_heading_levels(lines: &[String]) -> Vec<String> {
    let Some(min_level) = lines.iter().filter_map(|l| heading_level(l)).min() else {
        return lines.to_vec();
    };
    let shift = min_level - 1;
    lines.iter().map(|l| relevel(l, shift)).collect()
}
