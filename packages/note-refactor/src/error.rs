//! Error types for note refactoring.
//!
//! Operations that find nothing to do (empty selection, no matching heading)
//! are not errors; they surface as a [`SkipReason`](crate::types::SkipReason)
//! on the report instead.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the note-refactor library.
#[derive(Debug, Error)]
pub enum RefactorError {
    /// Position does not exist in the document; fields are zero-based.
    #[error("Invalid position {}:{} in document with {line_count} lines", .line + 1, .ch + 1)]
    InvalidPosition {
        line: usize,
        ch: usize,
        line_count: usize,
    },

    /// Position string could not be parsed.
    #[error("Invalid position '{0}'. Expected LINE:COLUMN (e.g., 12:1)")]
    InvalidPositionFormat(String),

    /// Byte range does not select text of the document.
    #[error("Range {start}..{end} is not valid in a document of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Heading level outside 1..=6.
    #[error("Invalid heading level {0}. Expected a level between 1 and 6")]
    InvalidHeadingLevel(u8),

    /// Settings failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// De-duplication exhausted its suffix search.
    #[error("Could not find a free name for '{name}' after {attempts} attempts")]
    NameCollisionUnresolved { name: String, attempts: u32 },

    /// The original document changed between reading it and writing it back.
    #[error("Document changed before '{name}' could be linked: {detail}")]
    StaleRangeMutation { name: String, detail: String },

    /// Some blocks were not fully refactored.
    #[error("{failed} of {total} notes were not fully refactored")]
    Incomplete { failed: usize, total: usize },

    /// Origin note lies outside the vault.
    #[error("Note {} is not inside vault {}", .note.display(), .vault.display())]
    OutsideVault { note: PathBuf, vault: PathBuf },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl RefactorError {
    /// Build a stale-range error for the named block.
    pub fn stale(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::StaleRangeMutation {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for refactor operations.
pub type Result<T> = std::result::Result<T, RefactorError>;
