//! Placeholder substitution for note and link templates.

use chrono::NaiveDateTime;
use regex::Captures;

use super::date::format_date;
use crate::config::{DEFAULT_DATE_FORMAT, PLACEHOLDER};

/// Values available to a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// Title of the note the content came from.
    pub title: String,

    /// Link back to the note the content came from.
    pub link: String,

    /// Name of the new note.
    pub new_note_title: String,

    /// Link to the new note.
    pub new_note_link: String,

    /// Vault-relative path of the new note.
    pub new_note_path: String,

    /// Extracted lines exactly as they were in the original note.
    pub original_content: String,

    /// Content after composition (heading, exclusions, normalization).
    pub new_note_content: String,

    /// Clock for date placeholders.
    pub now: NaiveDateTime,
}

impl TemplateContext {
    fn resolve(&self, name: &str, argument: Option<&str>) -> Option<String> {
        let value = match name {
            "title" => self.title.clone(),
            "link" => self.link.clone(),
            "new_note_title" => self.new_note_title.clone(),
            "new_note_link" => self.new_note_link.clone(),
            "new_note_path" => self.new_note_path.clone(),
            "original_content" => self.original_content.clone(),
            "new_note_content" => self.new_note_content.clone(),
            "date" => format_date(self.now, argument.unwrap_or(DEFAULT_DATE_FORMAT)),
            _ => return None,
        };
        Some(value)
    }
}

/// Expand `template` with `context`.
///
/// An empty template means "no template": the composed content is
/// returned as is. Placeholders are replaced in a single pass, so
/// substituted values are never expanded again. Unknown placeholders are
/// left in place.
#[must_use]
pub fn render(template: &str, context: &TemplateContext) -> String {
    if template.is_empty() {
        return context.new_note_content.clone();
    }
    expand(template, context)
}

/// Expand placeholders in `text`; unlike [`render`], empty text stays
/// empty.
#[must_use]
pub fn expand(text: &str, context: &TemplateContext) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let argument = caps.get(2).map(|m| m.as_str().trim());
            context
                .resolve(name, argument)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Expand only the date placeholders of `text`.
///
/// Used for the file-name prefix, which has no note to describe yet.
#[must_use]
pub fn expand_dates(text: &str, now: NaiveDateTime) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            match caps.get(1).map(|m| m.as_str()) {
                Some("date") => format_date(
                    now,
                    caps.get(2)
                        .map_or(DEFAULT_DATE_FORMAT, |m| m.as_str().trim()),
                ),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}
