//! Path sandboxing for client-supplied note and image paths.
//!
//! Every path that arrives over the wire is resolved against the notes
//! root and rejected if it would escape it. Validation is purely lexical:
//! `.` and `..` segments are collapsed without touching the filesystem,
//! so a hostile path is refused before any I/O happens.

use std::path::{Component, Path, PathBuf};

/// Reasons a client-supplied path is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    /// Path is absolute (or carries a Windows drive/UNC prefix)
    AbsolutePath,
    /// Path climbs above the notes root
    EscapesRoot,
    /// Literal `.` or `..` — meaningless as a note or folder name
    InvalidName(String),
}

impl std::fmt::Display for SandboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SandboxError::AbsolutePath => write!(f, "absolute paths are not allowed"),
            SandboxError::EscapesRoot => write!(f, "path must be within the notes directory"),
            SandboxError::InvalidName(name) => write!(f, "invalid name: {}", name),
        }
    }
}

impl std::error::Error for SandboxError {}

/// Lexically clean a relative path: drop `.` segments, fold `..` into the
/// preceding segment, and reject anything absolute. A `..` with nothing
/// left to fold into means the path points above the root.
pub fn clean_relative(input: &str) -> Result<PathBuf, SandboxError> {
    if input == "." || input == ".." {
        return Err(SandboxError::InvalidName(input.to_string()));
    }

    let mut cleaned = PathBuf::new();
    for component in Path::new(input).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    return Err(SandboxError::EscapesRoot);
                }
            }
            Component::Normal(part) => cleaned.push(part),
            Component::RootDir | Component::Prefix(_) => {
                return Err(SandboxError::AbsolutePath);
            }
        }
    }

    Ok(cleaned)
}

/// Resolve a client-supplied relative path against `root`, guaranteeing the
/// result is `root` itself or a descendant of it.
///
/// `root` must already be absolute (the server canonicalizes it once at
/// startup), so the prefix comparison below is purely lexical — no stat
/// calls are made here.
pub fn resolve_within(root: &Path, input: &str) -> Result<PathBuf, SandboxError> {
    let cleaned = clean_relative(input)?;
    let resolved = root.join(&cleaned);

    if resolved == root || resolved.starts_with(root) {
        Ok(resolved)
    } else {
        Err(SandboxError::EscapesRoot)
    }
}
