//! Note store: sandboxed reads and the note tree index.
//!
//! A note is any file under the notes root with a (case-insensitive) `.md`
//! extension. Its logical reference is the root-relative path with the
//! extension stripped, slash-separated regardless of platform.

use crate::sandbox::{self, SandboxError};
use crate::MD_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum NoteError {
    /// The reference resolves outside the notes root
    PathEscape(SandboxError),
    /// The reference is in bounds but no file exists there
    NotFound(String),
}

impl std::fmt::Display for NoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteError::PathEscape(err) => write!(f, "invalid note path: {}", err),
            NoteError::NotFound(reference) => write!(f, "note '{}' not found", reference),
        }
    }
}

impl std::error::Error for NoteError {}

// ============================================================================
// Reading
// ============================================================================

/// Resolve a note reference to its on-disk path, without touching the
/// filesystem.
pub fn note_path(root: &Path, reference: &str) -> Result<PathBuf, SandboxError> {
    sandbox::resolve_within(root, &format!("{}.{}", reference, MD_EXTENSION))
}

/// Read the raw bytes of the note named by `reference`.
pub fn read_note(root: &Path, reference: &str) -> Result<Vec<u8>, NoteError> {
    let path = note_path(root, reference).map_err(NoteError::PathEscape)?;
    fs::read(&path).map_err(|_| NoteError::NotFound(reference.to_string()))
}

// ============================================================================
// Indexing
// ============================================================================

/// Walk the notes root and return every note reference, sorted ascending.
///
/// An empty tree is a valid, empty result. Any walk error aborts the
/// index; the caller decides how to surface it.
pub fn list_notes(root: &Path) -> Result<Vec<String>, walkdir::Error> {
    let mut references = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_markdown = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(MD_EXTENSION))
            .unwrap_or(false);
        if !is_markdown {
            continue;
        }
        if let Some(reference) = note_reference(root, entry.path()) {
            references.push(reference);
        }
    }

    references.sort();
    Ok(references)
}

/// Compute the logical reference for a note file: root-relative, extension
/// stripped, components joined with `/`.
fn note_reference(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let stem = relative.with_extension("");
    let parts: Vec<String> = stem
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
