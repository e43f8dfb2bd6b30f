//! Refactoring notes in a vault directory on disk.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use common::clock;
use note_refactor::config::{LinkStyle, Location};
use note_refactor::vault::link_formatter;
use note_refactor::{
    BufferEditor, FsVault, NameSource, Origin, Position, RefactorRequest, Refactorer, Settings,
    TextRange,
};

const PLAN: &str = "# Plan\n\nintro\n\n## Goals\n\nShip it\n\n## Risks\n\nNone yet\n";

fn write_plan(root: &Path) -> PathBuf {
    let dir = root.join("projects");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("Plan.md");
    fs::write(&path, PLAN).unwrap();
    path
}

#[test]
fn test_split_headings_into_same_folder() {
    let vault_dir = tempdir().unwrap();
    let plan = write_plan(vault_dir.path());
    let settings = Settings {
        new_file_location: Location::SameFolder,
        ..Settings::default()
    };

    let store = FsVault::open(vault_dir.path(), &settings).unwrap();
    let origin = Origin::from_path(store.relative_path(&plan).unwrap());
    assert_eq!(origin.path, PathBuf::from("projects/Plan.md"));

    let links = link_formatter(settings.link_style);
    let mut refactorer = Refactorer::new(settings, store, links).with_clock(clock());
    let mut editor = BufferEditor::new(fs::read_to_string(&plan).unwrap());

    let report = refactorer
        .run(&RefactorRequest::SplitByHeading { level: 2 }, &mut editor, &origin)
        .unwrap();
    assert!(report.is_success());

    let projects = vault_dir.path().join("projects");
    assert_eq!(
        fs::read_to_string(projects.join("Goals.md")).unwrap(),
        "## Goals\n\nShip it\n"
    );
    assert_eq!(
        fs::read_to_string(projects.join("Risks.md")).unwrap(),
        "## Risks\n\nNone yet"
    );

    refactorer
        .store()
        .rewrite_note(&origin.path, editor.text())
        .unwrap();
    assert_eq!(
        fs::read_to_string(&plan).unwrap(),
        "# Plan\n\nintro\n\n[[Goals]]\n[[Risks]]\n"
    );
}

#[test]
fn test_extract_into_specified_folder_with_markdown_links() {
    let vault_dir = tempdir().unwrap();
    let plan = write_plan(vault_dir.path());
    fs::create_dir_all(vault_dir.path().join("inbox")).unwrap();
    fs::write(vault_dir.path().join("inbox/Goals.md"), "taken").unwrap();

    let settings = Settings {
        new_file_location: Location::SpecifiedFolder,
        custom_folder: "inbox".to_string(),
        link_style: LinkStyle::Markdown,
        ..Settings::default()
    };
    let store = FsVault::open(vault_dir.path(), &settings).unwrap();
    let origin = Origin::from_path(store.relative_path(&plan).unwrap());
    let links = link_formatter(settings.link_style);
    let mut refactorer = Refactorer::new(settings, store, links).with_clock(clock());

    // "## Goals" through "Ship it"
    let mut editor = BufferEditor::new(PLAN)
        .with_selection(TextRange::new(Position::new(4, 0), Position::new(6, 7)));
    let report = refactorer
        .run(
            &RefactorRequest::Extract {
                name: NameSource::FirstLine,
            },
            &mut editor,
            &origin,
        )
        .unwrap();

    assert_eq!(report.open, Some(PathBuf::from("inbox/Goals (1).md")));
    assert_eq!(
        fs::read_to_string(vault_dir.path().join("inbox/Goals (1).md")).unwrap(),
        "## Goals\n\nShip it"
    );
    assert_eq!(
        fs::read_to_string(vault_dir.path().join("inbox/Goals.md")).unwrap(),
        "taken"
    );
    assert!(editor
        .text()
        .contains("\n[Goals (1)](inbox/Goals%20%281%29.md)\n"));
}
