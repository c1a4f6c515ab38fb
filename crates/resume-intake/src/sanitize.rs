//! Helpers for keeping file locations out of logs and span attributes.
//!
//! Resumes carry personal data and their paths often do too (user names,
//! folder names), so only file names or hashes leave this module.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => "<unknown>".to_string(),
    }
}

/// Strips any directory part from a client-supplied file name.
///
/// Browsers and upload tools sometimes send full paths with either
/// separator (`C:\Users\me\resume.pdf`), regardless of the host OS.
pub fn display_name(raw: &str) -> String {
    let name = raw
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() {
        "<unnamed>".to_string()
    } else {
        name.to_string()
    }
}

/// Stable per-process fingerprint of a path, for correlating spans.
pub fn hash_path(path: &Path) -> String {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
