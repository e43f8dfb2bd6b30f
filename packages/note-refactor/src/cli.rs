//! Command-line interface for note refactoring.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Settings, CONFIG_ENV_VAR};
use crate::editor::BufferEditor;
use crate::error::{RefactorError, Result};
use crate::refactor::{BlockOutcome, NameSource, Origin, RefactorReport, RefactorRequest, Refactorer};
use crate::types::{Position, TextRange};
use crate::vault::{link_formatter, FsVault};

/// Note Refactor - Extract and split markdown notes into new notes.
#[derive(Parser)]
#[command(name = "note-refactor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Vault root directory
    #[arg(long, global = true, default_value = ".")]
    pub vault: PathBuf,

    /// Settings file (default: <vault>/.note-refactor.yaml)
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move the selected text into a new note and link it.
    Extract {
        /// Note to refactor
        file: PathBuf,

        /// Selection start as LINE:COLUMN (one-based)
        #[arg(long)]
        from: Position,

        /// Selection end as LINE:COLUMN (one-based, exclusive)
        #[arg(long)]
        to: Position,

        #[command(flatten)]
        naming: Naming,
    },

    /// Move everything from a position to the end into a new note.
    Split {
        /// Note to refactor
        file: PathBuf,

        /// Split point as LINE:COLUMN (one-based)
        #[arg(long)]
        at: Position,

        #[command(flatten)]
        naming: Naming,
    },

    /// Move every heading section of a level into its own note.
    SplitHeadings {
        /// Note to refactor
        file: PathBuf,

        /// Heading level (1-6)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
        level: u8,
    },
}

/// How a single new note is named.
#[derive(Args, Debug)]
pub struct Naming {
    /// Name the note; the whole extracted text becomes its content
    #[arg(long, conflicts_with = "autogenerate")]
    pub name: Option<String>,

    /// Name the note from the file-name prefix only
    #[arg(long)]
    pub autogenerate: bool,
}

impl Naming {
    fn source(self) -> NameSource {
        match (self.name, self.autogenerate) {
            (Some(name), _) => NameSource::Given(name),
            (None, true) => NameSource::Autogenerate,
            (None, false) => NameSource::FirstLine,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let (file, request, selection) = match cli.command {
        Commands::Extract {
            file,
            from,
            to,
            naming,
        } => (
            file,
            RefactorRequest::Extract {
                name: naming.source(),
            },
            Some(TextRange::new(from, to)),
        ),
        Commands::Split { file, at, naming } => (
            file,
            RefactorRequest::Split {
                name: naming.source(),
            },
            Some(TextRange::cursor(at)),
        ),
        Commands::SplitHeadings { file, level } => {
            (file, RefactorRequest::SplitByHeading { level }, None)
        }
    };

    refactor_command(&cli.vault, cli.config.as_deref(), &file, &request, selection)
}

/// Execute a refactoring against a note on disk.
fn refactor_command(
    vault: &Path,
    config: Option<&Path>,
    file: &Path,
    request: &RefactorRequest,
    selection: Option<TextRange>,
) -> Result<()> {
    let settings = Settings::discover(config, vault)?;
    let store = FsVault::open(vault, &settings)?;
    let origin = Origin::from_path(store.relative_path(file)?);

    let original = fs::read_to_string(file)?;
    let mut editor = BufferEditor::new(original.clone());
    if let Some(selection) = selection {
        editor = editor.with_selection(selection);
    }

    println!(
        "{} {} ({})",
        style("Refactoring").bold(),
        style(origin.path.display()).cyan(),
        request.mode()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Writing notes...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let links = link_formatter(settings.link_style);
    let mut refactorer = Refactorer::new(settings, store, links);
    let report = match refactorer.run(request, &mut editor, &origin) {
        Ok(report) => report,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    let written_back = if editor.text() == original {
        Ok(())
    } else {
        pb.set_message("Updating original note...");
        write_back(refactorer.store(), file, &origin, &original, editor.text())
    };

    pb.finish_and_clear();
    print_report(&report);

    if let Err(e) = written_back {
        println!();
        println!(
            "{} {}",
            style("Original note not updated:").red().bold(),
            origin.path.display()
        );
        return Err(e);
    }

    let failed = report.failures().count();
    if failed > 0 {
        return Err(RefactorError::Incomplete {
            failed,
            total: report.blocks.len(),
        });
    }
    Ok(())
}

/// Rewrite the origin note unless it changed on disk since it was read.
fn write_back(
    store: &FsVault,
    file: &Path,
    origin: &Origin,
    original: &str,
    updated: &str,
) -> Result<()> {
    let on_disk = fs::read_to_string(file)?;
    if on_disk != original {
        return Err(RefactorError::stale(
            origin.title.clone(),
            "the note changed on disk while refactoring",
        ));
    }
    store.rewrite_note(&origin.path, updated)
}

fn print_report(report: &RefactorReport) {
    if let Some(reason) = report.skipped {
        println!("{} {reason}", style("Nothing to do:").yellow().bold());
        return;
    }

    for outcome in &report.blocks {
        match outcome {
            BlockOutcome::Created {
                path,
                appended: true,
                ..
            } => {
                println!("  {} {}", style("Appended to").green(), path.display());
            }
            BlockOutcome::Created { path, .. } => {
                println!("  {} {}", style("Created").green(), path.display());
            }
            BlockOutcome::WriteFailed { name, error } => {
                println!("  {} {name}: {error}", style("Failed").red().bold());
            }
            BlockOutcome::ReplaceFailed { path, error, .. } => {
                println!(
                    "  {} {} (original not updated: {error})",
                    style("Created").yellow(),
                    path.display()
                );
            }
        }
    }

    if let Some(path) = &report.open {
        println!();
        println!("{} {}", style("Open:").green().bold(), path.display());
    }
}
