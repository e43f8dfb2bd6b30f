//! Note Refactor - Extract and split markdown notes into new notes.
//!
//! This crate moves selected text, the rest of a note, or whole heading
//! sections into new notes, names them safely, renders them through
//! optional templates, and links them from the original note.
//!
//! # Example
//!
//! ```
//! use note_refactor::naming::{ensure_unique, sanitize};
//! use std::collections::HashSet;
//!
//! assert_eq!(sanitize("Foo/Bar", 0), "Foo-Bar");
//!
//! let names = ensure_unique(&["Note", "Note", "Note"], &HashSet::new()).unwrap();
//! assert_eq!(names, vec!["Note", "Note (1)", "Note (2)"]);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Settings, constants and validation
//! - [`types`]: Core data types (Document, ExtractedBlock, ReplaceMode, etc.)
//! - [`error`]: Error types and Result alias
//! - [`splitting`]: Selection, remainder and heading segmentation
//! - [`naming`]: Title rewriting, sanitization and de-duplication
//! - [`compose`]: New note content assembly
//! - [`template`]: Placeholder and date expansion
//! - [`replace`]: Rewriting the original note
//! - [`editor`]: Editor abstraction and in-memory buffer
//! - [`vault`]: Note storage and link formatting
//! - [`refactor`]: Main refactoring service
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod compose;
pub mod config;
pub mod editor;
pub mod error;
pub mod naming;
pub mod refactor;
pub mod replace;
pub mod splitting;
pub mod template;
pub mod types;
pub mod vault;

// Re-export main types
pub use refactor::{BlockOutcome, NameSource, Origin, RefactorReport, RefactorRequest, Refactorer};

// Re-export commonly used items
pub use config::{validate_heading_level, Settings};
pub use editor::{BufferEditor, Editor};
pub use error::{RefactorError, Result};
pub use types::{Document, ExtractedBlock, Position, ReplaceMode, SkipReason, TextRange};
pub use vault::{FsVault, LinkFormatter, NoteStore};
