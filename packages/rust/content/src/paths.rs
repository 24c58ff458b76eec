//! Canonical path and name normalization.
//!
//! Tree keys, resource ids, and shard filenames all share one discipline:
//! lowercase, derived solely from the source directory/file name. Viewers
//! rebuild fetch URLs from these keys, so the pipeline and this module are
//! the single source of truth for casing and joining.
//!
//! All functions are pure and idempotent; any string is valid input.

use std::path::Path;

/// Separator used when joining canonical relative path segments.
pub const PATH_SEPARATOR: char = '/';

/// Joiner used when flattening a relative path into a single filename.
pub const FLATTEN_JOINER: &str = "__";

/// Canonical mapping key for a directory or file name.
pub fn canonical_key(name: &str) -> String {
    name.to_lowercase()
}

/// Canonical relative path: every segment lowercased, joined with `/`.
///
/// `path` must already be relative to the content root; separators from the
/// host platform are normalized away by walking components.
pub fn canonical_rel_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect::<Vec<_>>()
        .join(&PATH_SEPARATOR.to_string())
}

/// Flatten a canonical relative path into a single filename component by
/// replacing path separators with `__`.
pub fn flatten_rel_path(rel: &str) -> String {
    rel.replace(['/', '\\'], FLATTEN_JOINER)
}

/// Lowercase, extension-stripped id for a resource source filename.
pub fn resource_id(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| filename.to_lowercase())
}

/// Human-readable fallback label: `-`/`_` become spaces, and the first
/// letter of every word is uppercased.
pub fn format_label(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            if !ch.is_alphanumeric() {
                at_word_start = true;
            }
            out.push(ch);
        }
    }
    out
}
