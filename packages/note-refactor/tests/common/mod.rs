#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use note_refactor::vault::{appended, NoteStore};
use note_refactor::{RefactorError, Result};

/// Note store kept in memory; names listed in `fail_on` refuse writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub notes: BTreeMap<PathBuf, String>,
    pub folder: PathBuf,
    pub fail_on: HashSet<String>,
}

impl MemoryStore {
    pub fn with_notes(names: &[&str]) -> Self {
        let mut store = Self::default();
        for name in names {
            store
                .notes
                .insert(PathBuf::from(format!("{name}.md")), String::new());
        }
        store
    }

    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_on.insert(name.to_string());
        self
    }

    pub fn note(&self, path: &str) -> Option<&str> {
        self.notes.get(Path::new(path)).map(String::as_str)
    }
}

impl NoteStore for MemoryStore {
    fn target_folder(&self, _origin: &Path) -> Result<PathBuf> {
        Ok(self.folder.clone())
    }

    fn existing_names(&self, folder: &Path) -> Result<HashSet<String>> {
        Ok(self
            .notes
            .keys()
            .filter(|path| path.parent() == Some(folder))
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect())
    }

    fn exists(&self, folder: &Path, name: &str) -> bool {
        self.notes.contains_key(&self.note_path(folder, name))
    }

    fn note_path(&self, folder: &Path, name: &str) -> PathBuf {
        folder.join(format!("{name}.md"))
    }

    fn create_or_append(&mut self, folder: &Path, name: &str, content: &str) -> Result<PathBuf> {
        if self.fail_on.contains(name) {
            return Err(RefactorError::Io(std::io::Error::other("disk full")));
        }
        let path = self.note_path(folder, name);
        let note = self.notes.entry(path.clone()).or_default();
        *note = appended(note, content);
        Ok(path)
    }
}

/// Fixed clock: 2024-06-01 08:30.
pub fn clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(8, 30, 0))
        .unwrap()
}
