//! Link syntax for notes.

use std::path::Path;

use crate::config::LinkStyle;

/// Renders a link to a note.
pub trait LinkFormatter {
    /// Link to the note at the vault-relative `path`; `embed` makes it a
    /// transclusion.
    fn link_for(&self, path: &Path, embed: bool) -> String;
}

/// `[[name]]` links, resolved by note name.
#[derive(Debug, Clone, Copy, Default)]
pub struct WikiLinkFormatter;

impl LinkFormatter for WikiLinkFormatter {
    fn link_for(&self, path: &Path, embed: bool) -> String {
        format!("{}[[{}]]", embed_marker(embed), note_name(path))
    }
}

/// `[name](path.md)` links with the path percent-encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLinkFormatter;

impl LinkFormatter for MarkdownLinkFormatter {
    fn link_for(&self, path: &Path, embed: bool) -> String {
        format!(
            "{}[{}]({})",
            embed_marker(embed),
            note_name(path),
            encode_path(path)
        )
    }
}

/// Formatter for the configured link style.
#[must_use]
pub fn link_formatter(style: LinkStyle) -> Box<dyn LinkFormatter> {
    match style {
        LinkStyle::Wiki => Box::new(WikiLinkFormatter),
        LinkStyle::Markdown => Box::new(MarkdownLinkFormatter),
    }
}

impl LinkFormatter for Box<dyn LinkFormatter> {
    fn link_for(&self, path: &Path, embed: bool) -> String {
        self.as_ref().link_for(path, embed)
    }
}

fn embed_marker(embed: bool) -> &'static str {
    if embed {
        "!"
    } else {
        ""
    }
}

fn note_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Vault-relative path with `/` separators and each component
/// percent-encoded.
fn encode_path(path: &Path) -> String {
    path.components()
        .map(|c| urlencoding::encode(&c.as_os_str().to_string_lossy()).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
