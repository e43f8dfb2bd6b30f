//! Note storage and link generation for a vault of markdown notes.

mod link;
mod writer;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use link::{link_formatter, LinkFormatter, MarkdownLinkFormatter, WikiLinkFormatter};
pub use writer::FsVault;

/// Where notes live.
///
/// Folders and paths are relative to the vault root; names are file stems
/// without the `.md` extension.
pub trait NoteStore {
    /// Folder new notes go into when refactoring the note at `origin`.
    fn target_folder(&self, origin: &Path) -> Result<PathBuf>;

    /// Names of the notes already in `folder`.
    fn existing_names(&self, folder: &Path) -> Result<HashSet<String>>;

    /// Whether a note called `name` exists in `folder`.
    fn exists(&self, folder: &Path, name: &str) -> bool;

    /// Path of the note called `name` in `folder`.
    fn note_path(&self, folder: &Path, name: &str) -> PathBuf;

    /// Create the note, or append to it when it already exists.
    ///
    /// Returns the note's path.
    fn create_or_append(&mut self, folder: &Path, name: &str, content: &str) -> Result<PathBuf>;
}

/// Join existing note text and appended content so the appended content
/// starts on its own line.
#[must_use]
pub fn appended(existing: &str, content: &str) -> String {
    if existing.is_empty() || existing.ends_with('\n') {
        format!("{existing}{content}")
    } else {
        format!("{existing}\n{content}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appended() {
        assert_eq!(appended("", "new"), "new");
        assert_eq!(appended("old\n", "new"), "old\nnew");
        assert_eq!(appended("old", "new"), "old\nnew");
    }
}
