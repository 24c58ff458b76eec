//! Recursive content tree scanner.
//!
//! One call builds the [`TopicNode`] for one directory: institution metadata
//! (root only), lesson index + shard, both resource kinds, then recursion
//! into non-reserved subdirectories. Ownership is strictly top-down — each
//! parent exclusively owns its children map, so the walk is a pure recursive
//! function with no shared accumulator.

use std::path::Path;

use tracing::{debug, instrument, warn};

use studypack_content::{canonical_key, canonical_rel_path, format_label};
use studypack_shared::{
    InstitutionMeta, LessonShard, Result, StudypackError, TopicNode, TopicResources,
};

use crate::layout::{SiteLayout, write_json};
use crate::resources::{self, ResourceKind};

/// Optional display-name metadata file at an institution root.
pub const META_FILE: &str = "meta.json";

/// Shared inputs for one pipeline run's scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanContext<'a> {
    /// Root directory holding the institution trees.
    pub content_root: &'a Path,
    /// Output locations.
    pub layout: &'a SiteLayout,
}

/// Recursively scan one directory into an owned [`TopicNode`].
///
/// Missing optional inputs (meta.json, index.md, resource dirs) trigger
/// documented fallbacks; genuine I/O failures on required steps propagate
/// and abort the institution scan.
#[instrument(skip(ctx), fields(dir = %dir.display()))]
pub fn scan_directory(dir: &Path, institution_root: bool, ctx: &ScanContext) -> Result<TopicNode> {
    let base_name = dir_base_name(dir);
    let rel_path = canonical_rel_path(dir.strip_prefix(ctx.content_root).unwrap_or(dir));

    let mut node = TopicNode::default();

    if institution_root {
        node.name = Some(read_institution_name(dir, &base_name));
    }

    match studypack_content::extract_index(dir)? {
        Some(index) => {
            node.has_index = true;
            node.label = index.label;
            node.summary = Some(index.summary);

            let shard = LessonShard {
                markdown_content: index.body,
            };
            write_json(&ctx.layout.lesson_shard_path(&rel_path), &shard)?;
            node.content_path = Some(ctx.layout.lesson_content_ref(&rel_path));
        }
        None => {
            node.has_index = false;
            node.label = format_label(&base_name);
        }
    }

    let collected = TopicResources {
        collection_quizzes: resources::collect(
            ResourceKind::CollectionQuizzes,
            dir,
            &rel_path,
            ctx.layout,
        )?,
        flashcard_decks: resources::collect(
            ResourceKind::FlashcardDecks,
            dir,
            &rel_path,
            ctx.layout,
        )?,
    };
    if !collected.is_empty() {
        node.resources = Some(collected);
    }

    for entry in std::fs::read_dir(dir).map_err(|e| StudypackError::io(dir, e))? {
        let entry = entry.map_err(|e| StudypackError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }
        if !entry.path().is_dir() {
            continue;
        }

        let child = scan_directory(&entry.path(), false, ctx)?;
        node.children.insert(canonical_key(&name), child);
    }

    // A node is a branch when it has children, or when it is a pure
    // resource hub (no body content of its own but quizzes/decks attached).
    node.is_branch = !node.children.is_empty() || (!node.has_index && node.resources.is_some());

    debug!(
        rel = %rel_path,
        has_index = node.has_index,
        children = node.children.len(),
        is_branch = node.is_branch,
        "directory scanned"
    );

    Ok(node)
}

/// Institution display name from `meta.json`, with a formatted directory
/// name fallback. Absence and parse failures are never fatal.
fn read_institution_name(dir: &Path, base_name: &str) -> String {
    let meta_path = dir.join(META_FILE);
    let text = match std::fs::read_to_string(&meta_path) {
        Ok(text) => text,
        Err(_) => return format_label(base_name),
    };

    match serde_json::from_str::<InstitutionMeta>(&text) {
        Ok(meta) => meta
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format_label(base_name)),
        Err(e) => {
            warn!(path = %meta_path.display(), error = %e, "malformed meta.json, using fallback name");
            format_label(base_name)
        }
    }
}

fn dir_base_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
