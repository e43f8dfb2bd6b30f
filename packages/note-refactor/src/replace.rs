//! Rewriting the original note after content has been moved out.
//!
//! Edits are planned against the immutable snapshot the blocks were taken
//! from and applied to the live editor in document order. Every edit
//! checks that the live text still holds what the snapshot held at the
//! (shifted) span before touching it.

use std::ops::Range;

use crate::editor::{checked_range, Editor};
use crate::error::{RefactorError, Result};
use crate::types::{Document, ReplaceMode};

/// One mutation of the original note, in snapshot coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEdit {
    /// Byte span in the snapshot.
    pub span: Range<usize>,

    /// Text the snapshot holds at `span`.
    pub expected: String,

    /// Text to put in its place.
    pub replacement: String,
}

/// Plan how `mode` rewrites the snapshot for an extracted range.
///
/// `replace-selection` and `replace-headings` replace the range itself;
/// `split` replaces everything from the range start to the end of the
/// note. An empty link removes the text.
pub fn plan(
    mode: ReplaceMode,
    snapshot: &Document,
    extracted: Range<usize>,
    link: &str,
) -> Result<PlannedEdit> {
    let text = snapshot.text();
    let span = match mode {
        ReplaceMode::ReplaceSelection | ReplaceMode::ReplaceHeadings => extracted,
        ReplaceMode::Split => extracted.start..text.len(),
    };
    let expected = checked_range(text, span.clone())?.to_string();

    Ok(PlannedEdit {
        span,
        expected,
        replacement: link.to_string(),
    })
}

/// Rewrite `original` as `mode` would, returning the new text.
///
/// # Examples
/// ```
/// use note_refactor::replace::plan_text;
/// use note_refactor::types::ReplaceMode;
///
/// let text = "keep\nmove this\nand this";
/// let rewritten = plan_text(ReplaceMode::Split, text, 5..14, "[[Moved]]").unwrap();
/// assert_eq!(rewritten, "keep\n[[Moved]]");
/// ```
pub fn plan_text(
    mode: ReplaceMode,
    original: &str,
    extracted: Range<usize>,
    link: &str,
) -> Result<String> {
    let edit = plan(mode, &Document::new(original), extracted, link)?;
    let mut text = original.to_string();
    text.replace_range(edit.span, &edit.replacement);
    Ok(text)
}

/// Applies planned edits to a live editor in document order.
///
/// Earlier edits move later spans; the applier keeps the running shift so
/// each edit lands on the text it was planned for.
pub struct EditApplier<'a, E: Editor + ?Sized> {
    editor: &'a mut E,
    shift: isize,
    applied_up_to: usize,
}

impl<'a, E: Editor + ?Sized> EditApplier<'a, E> {
    /// Start applying edits to `editor`.
    pub fn new(editor: &'a mut E) -> Self {
        Self {
            editor,
            shift: 0,
            applied_up_to: 0,
        }
    }

    /// Apply the edit for the note `name`.
    ///
    /// Fails with [`RefactorError::StaleRangeMutation`] when the edit
    /// overlaps or precedes one already applied, or when the live text
    /// differs from the snapshot at the shifted span. A failed edit leaves
    /// the editor and the running shift untouched.
    pub fn apply(&mut self, name: &str, edit: &PlannedEdit) -> Result<()> {
        if edit.span.start < self.applied_up_to {
            return Err(RefactorError::stale(
                name,
                format!(
                    "span {}..{} overlaps an edit already applied",
                    edit.span.start, edit.span.end
                ),
            ));
        }

        let live = self.shifted(&edit.span).ok_or_else(|| {
            RefactorError::stale(name, "span moved before the start of the note")
        })?;

        let snapshot = self.editor.snapshot();
        match snapshot.text().get(live.clone()) {
            Some(current) if current == edit.expected => {}
            Some(_) => {
                return Err(RefactorError::stale(
                    name,
                    format!("text at {}..{} no longer matches", live.start, live.end),
                ))
            }
            None => {
                return Err(RefactorError::stale(
                    name,
                    format!(
                        "span {}..{} is outside the {} byte note",
                        live.start,
                        live.end,
                        snapshot.text().len()
                    ),
                ))
            }
        }

        self.editor.replace_range(live, &edit.replacement)?;
        self.shift += edit.replacement.len() as isize - edit.span.len() as isize;
        self.applied_up_to = edit.span.end;

        tracing::debug!(
            name,
            start = edit.span.start,
            end = edit.span.end,
            shift = self.shift,
            "Replaced extracted text"
        );
        Ok(())
    }

    fn shifted(&self, span: &Range<usize>) -> Option<Range<usize>> {
        let start = span.start.checked_add_signed(self.shift)?;
        let end = span.end.checked_add_signed(self.shift)?;
        Some(start..end)
    }
}
