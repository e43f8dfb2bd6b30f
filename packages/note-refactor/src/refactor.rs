//! Refactoring service that ties all components together.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::compose::{compose, ComposeOptions};
use crate::config::{validate_heading_level, Settings};
use crate::editor::Editor;
use crate::error::{RefactorError, Result};
use crate::naming::{candidate_name, ensure_unique};
use crate::replace::{plan, EditApplier};
use crate::splitting::{remainder_block, selection_block, split_by_heading};
use crate::template::{expand, render, TemplateContext};
use crate::types::{Document, ExtractedBlock, ReplaceMode, SkipReason};
use crate::vault::{LinkFormatter, NoteStore};

/// How the new note's name is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    /// The first extracted line names the note.
    FirstLine,

    /// The user named the note; the extracted text is all content.
    Given(String),

    /// The rendered file-name prefix names the note; the extracted text is
    /// all content.
    Autogenerate,
}

impl NameSource {
    fn is_content_only(&self) -> bool {
        !matches!(self, Self::FirstLine)
    }
}

/// A refactoring to run against the open note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefactorRequest {
    /// Move the selection into a new note.
    Extract { name: NameSource },

    /// Move everything from the cursor on into a new note.
    Split { name: NameSource },

    /// Move each heading section of `level` into its own note.
    SplitByHeading { level: u8 },
}

impl RefactorRequest {
    /// How the original note is rewritten.
    #[must_use]
    pub fn mode(&self) -> ReplaceMode {
        match self {
            Self::Extract { .. } => ReplaceMode::ReplaceSelection,
            Self::Split { .. } => ReplaceMode::Split,
            Self::SplitByHeading { .. } => ReplaceMode::ReplaceHeadings,
        }
    }
}

/// The note being refactored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Note name, used for `{{title}}`.
    pub title: String,

    /// Path relative to the vault root.
    pub path: PathBuf,
}

impl Origin {
    /// Origin for the note at a vault-relative path, titled by its file stem.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { title, path }
    }
}

/// What happened to one block.
#[derive(Debug)]
pub enum BlockOutcome {
    /// Note written and original rewritten; `appended` when the note
    /// already existed.
    Created {
        name: String,
        path: PathBuf,
        appended: bool,
    },

    /// Note could not be written; the original keeps the block.
    WriteFailed { name: String, error: RefactorError },

    /// Note written but the original could not be rewritten.
    ReplaceFailed {
        name: String,
        path: PathBuf,
        error: RefactorError,
    },
}

impl BlockOutcome {
    /// Name of the note.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Created { name, .. }
            | Self::WriteFailed { name, .. }
            | Self::ReplaceFailed { name, .. } => name,
        }
    }

    /// Path of the note, if it was written.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Created { path, .. } | Self::ReplaceFailed { path, .. } => Some(path),
            Self::WriteFailed { .. } => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&RefactorError> {
        match self {
            Self::Created { .. } => None,
            Self::WriteFailed { error, .. } | Self::ReplaceFailed { error, .. } => Some(error),
        }
    }
}

/// Result of a refactoring.
#[derive(Debug)]
pub struct RefactorReport {
    pub mode: ReplaceMode,

    /// Set when there was nothing to do.
    pub skipped: Option<SkipReason>,

    /// One entry per block, in document order.
    pub blocks: Vec<BlockOutcome>,

    /// Note to open afterwards.
    pub open: Option<PathBuf>,
}

impl RefactorReport {
    fn skipped(mode: ReplaceMode, reason: SkipReason) -> Self {
        Self {
            mode,
            skipped: Some(reason),
            blocks: Vec::new(),
            open: None,
        }
    }

    /// Blocks that failed to write or to link.
    pub fn failures(&self) -> impl Iterator<Item = &BlockOutcome> {
        self.blocks.iter().filter(|b| b.error().is_some())
    }

    /// Whether every block was fully refactored.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Runs refactorings against a note store.
pub struct Refactorer<S, L> {
    settings: Settings,
    store: S,
    links: L,
    now: NaiveDateTime,
}

impl<S: NoteStore, L: LinkFormatter> Refactorer<S, L> {
    /// Create a refactorer using the local clock.
    pub fn new(settings: Settings, store: S, links: L) -> Self {
        Self {
            settings,
            store,
            links,
            now: Local::now().naive_local(),
        }
    }

    /// Use a fixed clock for date placeholders.
    #[must_use]
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// The note store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run `request` against the note in `editor`.
    ///
    /// Segmentation and naming errors abort before anything is written.
    /// Once notes are being written, failures are recorded per block and
    /// the remaining blocks are still processed.
    pub fn run<E: Editor + ?Sized>(
        &mut self,
        request: &RefactorRequest,
        editor: &mut E,
        origin: &Origin,
    ) -> Result<RefactorReport> {
        let mode = request.mode();
        let snapshot = editor.snapshot();

        let (blocks, name_source) = match request {
            RefactorRequest::Extract { name } => (selection_block(&snapshot)?, name),
            RefactorRequest::Split { name } => (remainder_block(&snapshot)?, name),
            RefactorRequest::SplitByHeading { level } => {
                return self.run_headings(*level, &snapshot, editor, origin);
            }
        };

        let Some(block) = blocks else {
            tracing::info!(%mode, "Nothing selected, skipping");
            return Ok(RefactorReport::skipped(mode, SkipReason::EmptySelection));
        };

        let folder = self.store.target_folder(&origin.path)?;
        let name = match name_source {
            NameSource::FirstLine => {
                let candidate = candidate_name(&block.header, &self.settings, self.now, 0);
                let existing = self.store.existing_names(&folder)?;
                ensure_unique(&[candidate], &existing)?
                    .into_iter()
                    .next()
                    .unwrap_or_default()
            }
            NameSource::Given(given) => candidate_name(given, &self.settings, self.now, 0),
            NameSource::Autogenerate => candidate_name("", &self.settings, self.now, 0),
        };

        let options = ComposeOptions::from_settings(&self.settings)
            .with_content_only(name_source.is_content_only());
        let mut applier = EditApplier::new(editor);
        let outcome = self.refactor_block(
            &block, &name, &folder, mode, &options, &snapshot, &mut applier, origin,
        );

        let open = match &outcome {
            BlockOutcome::Created { path, .. } | BlockOutcome::ReplaceFailed { path, .. }
                if self.settings.open_new_note =>
            {
                Some(path.clone())
            }
            _ => None,
        };

        Ok(RefactorReport {
            mode,
            skipped: None,
            blocks: vec![outcome],
            open,
        })
    }

    fn run_headings<E: Editor + ?Sized>(
        &mut self,
        level: u8,
        snapshot: &Document,
        editor: &mut E,
        origin: &Origin,
    ) -> Result<RefactorReport> {
        let mode = ReplaceMode::ReplaceHeadings;
        validate_heading_level(level)?;

        let blocks = split_by_heading(snapshot, level)?;
        if blocks.is_empty() {
            tracing::info!(level, "No matching heading, skipping");
            return Ok(RefactorReport::skipped(mode, SkipReason::NoHeadingFound { level }));
        }

        // All names are settled before the first write
        let folder = self.store.target_folder(&origin.path)?;
        let candidates: Vec<String> = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| candidate_name(&block.header, &self.settings, self.now, index))
            .collect();
        let existing = self.store.existing_names(&folder)?;
        let names = ensure_unique(&candidates, &existing)?;

        tracing::info!(level, notes = names.len(), "Splitting note by heading");

        let options = ComposeOptions::from_settings(&self.settings);
        let mut applier = EditApplier::new(editor);
        let outcomes = blocks
            .iter()
            .zip(&names)
            .map(|(block, name)| {
                self.refactor_block(
                    block, name, &folder, mode, &options, snapshot, &mut applier, origin,
                )
            })
            .collect();

        Ok(RefactorReport {
            mode,
            skipped: None,
            blocks: outcomes,
            open: None,
        })
    }

    /// Write one block's note, then link it from the original.
    #[allow(clippy::too_many_arguments)]
    fn refactor_block<E: Editor + ?Sized>(
        &mut self,
        block: &ExtractedBlock,
        name: &str,
        folder: &Path,
        mode: ReplaceMode,
        options: &ComposeOptions,
        snapshot: &Document,
        applier: &mut EditApplier<'_, E>,
        origin: &Origin,
    ) -> BlockOutcome {
        let planned_path = self.store.note_path(folder, name);
        let mut context = TemplateContext {
            title: origin.title.clone(),
            link: self.links.link_for(&origin.path, false),
            new_note_title: name.to_string(),
            new_note_link: self
                .links
                .link_for(&planned_path, self.settings.use_embedding_type),
            new_note_path: display_path(&planned_path),
            original_content: block.text(),
            new_note_content: compose(&block.header, &block.body, options),
            now: self.now,
        };
        let note = render(&self.settings.refactored_note_template, &context);

        let appended = self.store.exists(folder, name);
        let path = match self.store.create_or_append(folder, name, &note) {
            Ok(path) => path,
            Err(error) => {
                tracing::warn!(name, error = %error, "Failed to write note");
                return BlockOutcome::WriteFailed {
                    name: name.to_string(),
                    error,
                };
            }
        };

        let replacement = if self.settings.note_link_template.is_empty() {
            self.links.link_for(&path, self.settings.transclude_by_default)
        } else {
            context.new_note_link = self.links.link_for(&path, false);
            context.new_note_path = display_path(&path);
            expand(&self.settings.note_link_template, &context)
        };

        let linked = plan(mode, snapshot, block.span.clone(), &replacement)
            .and_then(|edit| applier.apply(name, &edit));
        match linked {
            Ok(()) => {
                tracing::info!(
                    name,
                    path = %path.display(),
                    %mode,
                    appended,
                    "Refactored block into note"
                );
                BlockOutcome::Created {
                    name: name.to_string(),
                    path,
                    appended,
                }
            }
            Err(error) => {
                tracing::warn!(name, error = %error, "Note written but original not updated");
                BlockOutcome::ReplaceFailed {
                    name: name.to_string(),
                    path,
                    error,
                }
            }
        }
    }
}

/// Vault-relative path with `/` separators, as shown in templates.
fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_modes() {
        let extract = RefactorRequest::Extract {
            name: NameSource::FirstLine,
        };
        let split = RefactorRequest::Split {
            name: NameSource::Autogenerate,
        };
        assert_eq!(extract.mode(), ReplaceMode::ReplaceSelection);
        assert_eq!(split.mode(), ReplaceMode::Split);
        assert_eq!(
            RefactorRequest::SplitByHeading { level: 2 }.mode(),
            ReplaceMode::ReplaceHeadings
        );
    }

    #[test]
    fn test_origin_from_path() {
        let origin = Origin::from_path("projects/Road map.md");
        assert_eq!(origin.title, "Road map");
        assert_eq!(origin.path, PathBuf::from("projects/Road map.md"));
    }

    #[test]
    fn test_content_only_sources() {
        assert!(!NameSource::FirstLine.is_content_only());
        assert!(NameSource::Given("x".to_string()).is_content_only());
        assert!(NameSource::Autogenerate.is_content_only());
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(Path::new("a/b c.md")), "a/b c.md");
        assert_eq!(display_path(Path::new("")), "");
    }
}
