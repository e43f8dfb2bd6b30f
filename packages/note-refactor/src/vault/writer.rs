//! Vault backed by a directory of markdown files.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{appended, NoteStore};
use crate::config::{Location, Settings, NOTE_EXTENSION};
use crate::error::{RefactorError, Result};

/// Notes stored as `.md` files under a vault root.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    location: Location,
    custom_folder: PathBuf,
}

impl FsVault {
    /// Open the vault at `root`, placing new notes as `settings` say.
    pub fn open(root: &Path, settings: &Settings) -> Result<Self> {
        let root = root.canonicalize()?;
        tracing::debug!(root = %root.display(), "Opened vault");
        Ok(Self {
            root,
            location: settings.new_file_location,
            custom_folder: PathBuf::from(&settings.custom_folder),
        })
    }

    /// Absolute path of the vault root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `note` relative to the vault root.
    pub fn relative_path(&self, note: &Path) -> Result<PathBuf> {
        let absolute = note.canonicalize()?;
        absolute
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .map_err(|_| RefactorError::OutsideVault {
                note: absolute.clone(),
                vault: self.root.clone(),
            })
    }

    /// Replace the content of an existing note at a vault-relative path.
    pub fn rewrite_note(&self, path: &Path, content: &str) -> Result<()> {
        write_atomic(&self.root.join(path), content)?;
        tracing::debug!(path = %path.display(), "Rewrote note");
        Ok(())
    }

    fn file_name(name: &str) -> String {
        format!("{name}.{NOTE_EXTENSION}")
    }
}

/// Write to a temp file beside `path`, sync it, then rename it into place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

impl NoteStore for FsVault {
    fn target_folder(&self, origin: &Path) -> Result<PathBuf> {
        let folder = match self.location {
            Location::VaultFolder => PathBuf::new(),
            Location::SameFolder => origin.parent().map(Path::to_path_buf).unwrap_or_default(),
            Location::SpecifiedFolder => self.custom_folder.clone(),
        };
        Ok(folder)
    }

    fn existing_names(&self, folder: &Path) -> Result<HashSet<String>> {
        let dir = self.root.join(folder);
        if !dir.is_dir() {
            return Ok(HashSet::new());
        }

        let mut names = HashSet::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(NOTE_EXTENSION)) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                names.insert(stem.to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }

    fn exists(&self, folder: &Path, name: &str) -> bool {
        self.root.join(folder).join(Self::file_name(name)).is_file()
    }

    fn note_path(&self, folder: &Path, name: &str) -> PathBuf {
        folder.join(Self::file_name(name))
    }

    /// New notes are written atomically; existing notes are appended to.
    fn create_or_append(&mut self, folder: &Path, name: &str, content: &str) -> Result<PathBuf> {
        let output_dir = self.root.join(folder);
        fs::create_dir_all(&output_dir)?;

        let relative = self.note_path(folder, name);
        let output_file = self.root.join(&relative);

        if output_file.is_file() {
            let existing = fs::read_to_string(&output_file)?;
            let joined = appended(&existing, content);
            let addition = &joined[existing.len()..];
            let mut file = OpenOptions::new().append(true).open(&output_file)?;
            file.write_all(addition.as_bytes())?;
            file.sync_all()?;
            tracing::info!(path = %relative.display(), "Appended to existing note");
            return Ok(relative);
        }

        write_atomic(&output_file, content)?;

        tracing::info!(path = %relative.display(), "Created note");
        Ok(relative)
    }
}
