//! noteserve - render a tree of markdown notes as a local website.
//!
//! The crate is organized into the following modules:
//!
//! - `sandbox`: lexical path validation against the notes root
//! - `images`: canonical image URLs and markdown image reference rewriting
//! - `render`: markdown conversion with mermaid diagram substitution
//! - `templates`: fixed HTML shells for the note and landing pages
//! - `notes`: sandboxed note reads and the note tree index
//! - `server`: the HTTP routes composing all of the above

pub mod images;
pub mod notes;
pub mod render;
pub mod sandbox;
pub mod server;
pub mod templates;

// ============================================================================
// Configuration
// ============================================================================

/// Markdown file extension, compared case-insensitively.
pub const MD_EXTENSION: &str = "md";

/// Reserved on-disk directory name holding a folder's images. Never exposed
/// in canonical URLs; the server inserts it when mapping a URL to a file.
pub const IMAGES_DIRNAME: &str = "._images_";

/// Default notes root under the user's home directory.
pub const DEFAULT_NOTES_DIRNAME: &str = ".mynotes";

// Re-export commonly used items
pub use images::{canonical_url, rewrite_image_refs, storage_path};
pub use notes::{list_notes, note_path, read_note, NoteError};
pub use render::{markdown_to_html, render_page, replace_mermaid_fences};
pub use sandbox::{clean_relative, resolve_within, SandboxError};
pub use server::{build_router, open_browser, serve, ServerConfig};
pub use templates::{html_escape, landing_page, note_page};
