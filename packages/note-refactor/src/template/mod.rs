//! Template expansion for new notes and the links left behind.
//!
//! Recognized placeholders: `{{title}}`, `{{link}}`, `{{new_note_title}}`,
//! `{{new_note_link}}`, `{{new_note_path}}`, `{{original_content}}`,
//! `{{new_note_content}}`, `{{date}}` and `{{date:FORMAT}}`.

mod date;
mod engine;

pub use date::format_date;
pub use engine::{expand, expand_dates, render, TemplateContext};
