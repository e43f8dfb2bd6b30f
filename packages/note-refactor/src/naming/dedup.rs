//! Name de-duplication for a batch of new notes.

use std::collections::HashSet;

use crate::config::MAX_DEDUP_ATTEMPTS;
use crate::error::{RefactorError, Result};

/// Make every candidate unique against the batch and against `existing`.
///
/// Candidates are taken in order; a taken name gets `" (n)"` appended with
/// the smallest free `n >= 1`. Names are compared ignoring case. Output has
/// the same length and order as the input.
///
/// # Examples
/// ```
/// use std::collections::HashSet;
/// use note_refactor::naming::ensure_unique;
///
/// let names = ensure_unique(&["Note", "Note", "Note"], &HashSet::new()).unwrap();
/// assert_eq!(names, ["Note", "Note (1)", "Note (2)"]);
/// ```
pub fn ensure_unique<S: AsRef<str>>(
    candidates: &[S],
    existing: &HashSet<String>,
) -> Result<Vec<String>> {
    let mut taken: HashSet<String> = existing.iter().map(|name| name.to_lowercase()).collect();
    let mut unique = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let candidate = candidate.as_ref();
        let name = if taken.contains(&candidate.to_lowercase()) {
            free_variant(candidate, &taken)?
        } else {
            candidate.to_string()
        };
        taken.insert(name.to_lowercase());
        unique.push(name);
    }

    Ok(unique)
}

/// `taken` holds lowercased names.
fn free_variant(candidate: &str, taken: &HashSet<String>) -> Result<String> {
    (1..=MAX_DEDUP_ATTEMPTS)
        .map(|n| format!("{candidate} ({n})"))
        .find(|name| !taken.contains(&name.to_lowercase()))
        .ok_or_else(|| RefactorError::NameCollisionUnresolved {
            name: candidate.to_string(),
            attempts: MAX_DEDUP_ATTEMPTS,
        })
}
