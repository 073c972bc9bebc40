//! Storage paths for uploaded play cover images.

use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Directory, relative to the media root, that holds play cover images.
pub const PLAY_UPLOAD_DIR: &str = "uploads/play";

/// Where a cover image should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImageLocation {
    /// Stored on the play row.
    pub relative_path: String,
    /// `relative_path` resolved against the configured media root.
    pub absolute_path: PathBuf,
}

impl CoverImageLocation {
    pub fn new(media_root: &Path, relative_path: String) -> Self {
        let absolute_path = media_root.join(&relative_path);
        CoverImageLocation {
            relative_path,
            absolute_path,
        }
    }
}

/// Build `uploads/play/<slug>-<uuid><ext>` for an uploaded cover image.
///
/// The random component keeps two plays with the same title apart; the
/// original extension (with its dot) is preserved as uploaded.
pub fn play_image_file_path(title: &str, filename: &str) -> String {
    format!(
        "{PLAY_UPLOAD_DIR}/{}-{}{}",
        slugify(title),
        Uuid::new_v4(),
        extension_of(filename)
    )
}

/// Fold `value` to ASCII (NFKD, then drop what is left over), lowercase it,
/// drop anything that is not a letter, digit, underscore, hyphen or
/// whitespace, then join the words with single hyphens.
pub fn slugify(value: &str) -> String {
    let folded: String = value.nfkd().filter(char::is_ascii).collect();
    let kept: String = folded
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut pending_hyphen = false;
    for c in kept.chars() {
        if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
            continue;
        }
        if pending_hyphen && !slug.is_empty() {
            slug.push('-');
        }
        pending_hyphen = false;
        slug.push(c);
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Extension of the file name including the leading dot, or `""`.
///
/// Only the last component is considered, and a name that starts with its
/// only dot (`.env`) has no extension.
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
