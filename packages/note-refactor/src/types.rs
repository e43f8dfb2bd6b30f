//! Core data types for note refactoring.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{RefactorError, Result};

/// A cursor position: zero-based line and zero-based character offset
/// within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// Parses the human `LINE:COLUMN` form, both one-based.
///
/// # Examples
/// ```
/// use note_refactor::types::Position;
///
/// let pos: Position = "3:1".parse().unwrap();
/// assert_eq!(pos, Position::new(2, 0));
/// assert!("0:1".parse::<Position>().is_err());
/// ```
impl FromStr for Position {
    type Err = RefactorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RefactorError::InvalidPositionFormat(s.to_string());
        let (line, ch) = s.split_once(':').unwrap_or((s, "1"));
        let line: usize = line.trim().parse().map_err(|_| invalid())?;
        let ch: usize = ch.trim().parse().map_err(|_| invalid())?;
        if line == 0 || ch == 0 {
            return Err(invalid());
        }
        Ok(Self::new(line - 1, ch - 1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.ch + 1)
    }
}

/// A selection between two positions; `from` may come after `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub from: Position,
    pub to: Position,
}

impl TextRange {
    /// Create a new range.
    #[must_use]
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// A collapsed range (a bare cursor).
    #[must_use]
    pub fn cursor(at: Position) -> Self {
        Self { from: at, to: at }
    }

    /// Start and end in document order.
    #[must_use]
    pub fn ordered(&self) -> (Position, Position) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// Immutable snapshot of a document and its selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    selection: Option<TextRange>,
}

impl Document {
    /// Create a snapshot without a selection.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
        }
    }

    /// Attach a selection.
    #[must_use]
    pub fn with_selection(mut self, selection: TextRange) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TextRange> {
        self.selection
    }

    /// Lines of the document split on `\n`.
    ///
    /// A trailing newline yields a final empty line, the way an editor
    /// shows it.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Number of lines, counted like [`Document::lines`].
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Byte offset of a position.
    ///
    /// A character offset past the end of its line is an error rather than
    /// being clamped.
    pub fn offset_of(&self, pos: Position) -> Result<usize> {
        let invalid = || RefactorError::InvalidPosition {
            line: pos.line,
            ch: pos.ch,
            line_count: self.line_count(),
        };

        let mut line_start = 0;
        for (index, line) in self.lines().enumerate() {
            if index == pos.line {
                if pos.ch == line.chars().count() {
                    return Ok(line_start + line.len());
                }
                return line
                    .char_indices()
                    .nth(pos.ch)
                    .map(|(byte, _)| line_start + byte)
                    .ok_or_else(invalid);
            }
            line_start += line.len() + 1;
        }

        Err(invalid())
    }

    /// Byte range of the selection, in document order.
    pub fn selection_span(&self) -> Result<Option<Range<usize>>> {
        let Some(selection) = self.selection else {
            return Ok(None);
        };
        let (start, end) = selection.ordered();
        Ok(Some(self.offset_of(start)?..self.offset_of(end)?))
    }
}

/// A run of lines destined to become one new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    /// Line the note name is derived from.
    pub header: String,

    /// Remaining lines.
    pub body: Vec<String>,

    /// Byte span of the block in the snapshot it was taken from, without
    /// the newline that ends its last line.
    pub span: Range<usize>,
}

impl ExtractedBlock {
    /// Build a block from its lines; an empty list gives an empty header.
    #[must_use]
    pub fn from_lines(lines: Vec<String>, span: Range<usize>) -> Self {
        let mut lines = lines.into_iter();
        let header = lines.next().unwrap_or_default();
        Self {
            header,
            body: lines.collect(),
            span,
        }
    }

    /// All lines, header first.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        std::iter::once(self.header.as_str())
            .chain(self.body.iter().map(String::as_str))
            .collect()
    }

    /// The block's text as it appears in the document.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

/// How the original note is rewritten after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// The selection is replaced by a link.
    ReplaceSelection,

    /// Everything from the cursor on is moved out and replaced by a link.
    Split,

    /// Each heading section is replaced by a link to its note.
    ReplaceHeadings,
}

impl ReplaceMode {
    /// Kebab-case name, as used in logs and output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReplaceSelection => "replace-selection",
            Self::Split => "split",
            Self::ReplaceHeadings => "replace-headings",
        }
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No selection, or only whitespace selected.
    EmptySelection,

    /// No heading of the requested level.
    NoHeadingFound { level: u8 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelection => f.write_str("nothing selected"),
            Self::NoHeadingFound { level } => write!(f, "no level {level} heading found"),
        }
    }
}
