//! Resource collection: quiz banks and flashcard decks.
//!
//! Each topic directory may carry the reserved subdirectories
//! `_collection_quiz` and `_flashcards`. Every `.json` file inside becomes
//! one [`ResourceRef`] in the navigation tree and one shard file copied
//! verbatim under the site's content directory.
//!
//! Failure policy is item-granular: a malformed or unreadable file is logged
//! and skipped, sibling items and the surrounding scan continue. A missing
//! resource directory contributes nothing.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use studypack_content::{format_label, resource_id};
use studypack_shared::{ResourceRef, Result, StudypackError};

use crate::layout::SiteLayout;

/// Source content extension for resource items.
const RESOURCE_EXT: &str = ".json";

/// The two resource kinds a topic directory can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    CollectionQuizzes,
    FlashcardDecks,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [Self::CollectionQuizzes, Self::FlashcardDecks];

    /// Reserved source subdirectory under a topic directory.
    pub fn source_dir(self) -> &'static str {
        match self {
            Self::CollectionQuizzes => "_collection_quiz",
            Self::FlashcardDecks => "_flashcards",
        }
    }

    /// Output subdirectory under `<site>/content/`.
    pub fn output_dir(self) -> &'static str {
        match self {
            Self::CollectionQuizzes => "quizzes",
            Self::FlashcardDecks => "flashcards",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.output_dir())
    }
}

/// Title probe: the only field the index needs from an item's content.
#[derive(Debug, Default, Deserialize)]
struct TitledContent {
    #[serde(default)]
    title: Option<String>,
}

/// Collect one resource kind for a topic directory.
///
/// Copies every parseable `.json` item verbatim to
/// `<site>/content/<kind>/<rel_path>/<lowercased filename>` and returns the
/// refs in filesystem listing order (callers must not depend on order).
pub fn collect(
    kind: ResourceKind,
    topic_dir: &Path,
    rel_path: &str,
    layout: &SiteLayout,
) -> Result<Vec<ResourceRef>> {
    let source = topic_dir.join(kind.source_dir());
    if !source.is_dir() {
        return Ok(Vec::new());
    }

    let out_dir = layout.resource_dir(kind, rel_path);
    let entries = std::fs::read_dir(&source).map_err(|e| StudypackError::io(&source, e))?;

    let mut refs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %source.display(), error = %e, "skipping unreadable dir entry");
                continue;
            }
        };
        let filename = entry.file_name().to_string_lossy().into_owned();
        if !filename.ends_with(RESOURCE_EXT) || !entry.path().is_file() {
            continue;
        }

        let src_path = entry.path();
        let bytes = match std::fs::read(&src_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %src_path.display(), error = %e, "skipping unreadable resource item");
                continue;
            }
        };

        let content: TitledContent = match serde_json::from_slice(&bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %src_path.display(), error = %e, "skipping malformed resource item");
                continue;
            }
        };

        let id = resource_id(&filename);
        let title = content
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format_label(&id));

        // Shard copy is byte-for-byte; only the filename case changes.
        let dest = out_dir.join(filename.to_lowercase());
        if let Err(e) = std::fs::create_dir_all(&out_dir) {
            warn!(path = %out_dir.display(), error = %e, "skipping item, cannot create shard dir");
            continue;
        }
        if let Err(e) = std::fs::write(&dest, &bytes) {
            warn!(path = %dest.display(), error = %e, "skipping item, failed to write shard");
            continue;
        }

        debug!(kind = %kind, id = %id, shard = %dest.display(), "resource collected");
        refs.push(ResourceRef { id, title });
    }

    Ok(refs)
}
