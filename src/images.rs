//! Image reference rewriting.
//!
//! Markdown image targets come in two flavors and resolve differently:
//!
//! - `![a](x.png)` — a bare filename lives in the *current note's* folder,
//!   so the canonical URL carries the note's folder relative to the root.
//! - `![a](folder/x.png)` — a qualified target names a folder directly
//!   under the notes root, regardless of where the note itself lives.
//!
//! Both rewrite to the `/images/...` URL space. The reserved on-disk image
//! directory name never appears in a canonical URL; it is inserted again
//! only when the server maps a URL back to a physical file.

use crate::IMAGES_DIRNAME;
use regex::{Captures, Regex};

/// Matches `![alt](target)`. Targets never contain `)`.
const IMAGE_TAG_PATTERN: &str = r"!\[([^\]]*)\]\(([^)]+)\)";

/// Build the public URL for an image in `folder` (empty for root-level).
pub fn canonical_url(folder: &str, file: &str) -> String {
    if folder.is_empty() {
        format!("/images/{}", file)
    } else {
        format!("/images/{}/{}", folder, file)
    }
}

/// Build the root-relative on-disk path for an image in `folder`, with the
/// reserved image directory inserted between folder and filename.
pub fn storage_path(folder: &str, file: &str) -> String {
    if folder.is_empty() {
        format!("{}/{}", IMAGES_DIRNAME, file)
    } else {
        format!("{}/{}/{}", folder, IMAGES_DIRNAME, file)
    }
}

/// Rewrite every image reference in `content` to its canonical URL.
///
/// `note_ref` is the logical reference of the note being rendered
/// (slash-separated, no extension); bare filenames resolve against its
/// folder. Anything that is not a well-formed image tag passes through
/// unchanged.
pub fn rewrite_image_refs(content: &str, note_ref: &str) -> String {
    let re = Regex::new(IMAGE_TAG_PATTERN).expect("image tag pattern is valid");

    re.replace_all(content, |caps: &Captures| {
        let (alt, target) = match (caps.get(1), caps.get(2)) {
            (Some(alt), Some(target)) => (alt.as_str(), target.as_str()),
            _ => return caps[0].to_string(),
        };

        let url = if target.contains('/') || target.contains('\\') {
            // Qualified target: folder is rooted at the notes root.
            let split_at = target.rfind(['/', '\\']).unwrap_or(0);
            let folder = target[..split_at].trim_end_matches(['/', '\\']);
            let file = &target[split_at + 1..];
            canonical_url(folder, file)
        } else {
            // Bare filename: folder comes from the note's own location.
            match note_ref.rsplit_once('/') {
                Some((folder, _)) => canonical_url(folder, target),
                None => canonical_url("", target),
            }
        };

        format!("![{}]({})", alt, url)
    })
    .into_owned()
}
