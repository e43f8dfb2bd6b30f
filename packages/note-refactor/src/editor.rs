//! The editor holding the note being refactored.

use std::ops::Range;

use crate::error::{RefactorError, Result};
use crate::types::{Document, TextRange};

/// Access to the note being refactored.
pub trait Editor {
    /// Snapshot of the full text and the current selection.
    fn snapshot(&self) -> Document;

    /// Replace a byte range of the current text.
    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<()>;
}

/// Resolve `range` against `text`, rejecting ranges that are out of
/// bounds or split a character.
pub(crate) fn checked_range(text: &str, range: Range<usize>) -> Result<&str> {
    text.get(range.clone()).ok_or(RefactorError::InvalidRange {
        start: range.start,
        end: range.end,
        len: text.len(),
    })
}

/// In-memory editor over a string buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferEditor {
    text: String,
    selection: Option<TextRange>,
}

impl BufferEditor {
    /// Create an editor over `text` with nothing selected.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
        }
    }

    /// Set the selection.
    #[must_use]
    pub fn with_selection(mut self, selection: TextRange) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the editor, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Editor for BufferEditor {
    fn snapshot(&self) -> Document {
        let doc = Document::new(self.text.clone());
        match self.selection {
            Some(selection) => doc.with_selection(selection),
            None => doc,
        }
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> Result<()> {
        checked_range(&self.text, range.clone())?;
        self.text.replace_range(range, text);
        // Line/column positions no longer describe the same text
        self.selection = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn test_snapshot_carries_selection() {
        let selection = TextRange::new(Position::new(0, 1), Position::new(0, 3));
        let editor = BufferEditor::new("abcd").with_selection(selection);
        let doc = editor.snapshot();
        assert_eq!(doc.text(), "abcd");
        assert_eq!(doc.selection(), Some(selection));
    }

    #[test]
    fn test_replace_range() {
        let mut editor = BufferEditor::new("hello world")
            .with_selection(TextRange::cursor(Position::new(0, 0)));
        editor.replace_range(6..11, "[[World]]").unwrap();
        assert_eq!(editor.text(), "hello [[World]]");
        assert_eq!(editor.snapshot().selection(), None);
    }

    #[test]
    fn test_replace_range_rejects_bad_ranges() {
        let mut editor = BufferEditor::new("é");
        assert!(matches!(
            editor.replace_range(0..5, ""),
            Err(RefactorError::InvalidRange { len: 2, .. })
        ));
        // Inside a multi-byte character
        assert!(editor.replace_range(1..2, "").is_err());
        assert_eq!(editor.into_text(), "é");
    }
}
