use std::path::{Path, PathBuf};

use ae_core::OutputFormat;

pub const MAX_FILENAME_CHARS: usize = 100;

const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];
const FALLBACK_STEM: &str = "untitled";

/// Turn an article title into a file stem.
///
/// Drops `\ / * ? : " < > |`, trims, replaces each whitespace character
/// with `_` and keeps at most [`MAX_FILENAME_CHARS`] characters. Total:
/// an empty title gives an empty string.
pub fn sanitize_filename(title: &str) -> String {
    let cleaned: String = title.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect();

    cleaned
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

/// `dir/<sanitized title>.<ext>`, with a fallback stem for titles that
/// sanitize to nothing.
pub fn output_path(dir: &Path, title: &str, format: OutputFormat) -> PathBuf {
    let mut stem = sanitize_filename(title);
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }
    dir.join(format!("{}.{}", stem, format.extension()))
}
