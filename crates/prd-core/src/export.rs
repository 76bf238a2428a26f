use crate::error::Result;
use crate::io;
use std::path::{Path, PathBuf};

pub const MARKDOWN_MIME: &str = "text/markdown;charset=utf-8";
pub const DEFAULT_BASENAME: &str = "project";
pub const FILENAME_SUFFIX: &str = "-requirements.md";

/// Download filename for a project: `{name}-requirements.md`.
///
/// A blank name falls back to `default_basename`. Path separators and
/// control characters are replaced so the result is a single path segment.
pub fn filename_for(name: &str, default_basename: &str) -> String {
    let base: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let base = base.trim_matches('.');
    let base = if base.is_empty() {
        default_basename
    } else {
        base
    };
    format!("{base}{FILENAME_SUFFIX}")
}

/// `Content-Disposition` value for an attachment download.
///
/// Carries an ASCII `filename` for old clients plus an RFC 5987
/// `filename*` with the exact UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '_',
        })
        .collect();
    let encoded = urlencoding::encode(filename);
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

/// Save `markdown` as `filename` inside `dir`, returning the written path.
pub fn save_markdown(dir: &Path, filename: &str, markdown: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    io::atomic_write(&path, markdown.as_bytes())?;
    tracing::info!(path = %path.display(), bytes = markdown.len(), "saved markdown");
    Ok(path)
}
