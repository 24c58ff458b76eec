//! On-disk layout of the emitted site artifacts.
//!
//! ```text
//! <site_root>/
//! ├── database.json
//! └── content/
//!     ├── lessons/<flattened rel path>.json
//!     ├── quizzes/<rel path>/<lowercased filename>
//!     └── flashcards/<rel path>/<lowercased filename>
//! ```
//!
//! Viewers rebuild these paths from tree keys and resource ids, so every
//! joining rule here mirrors the canonical-key discipline in
//! `studypack_content::paths`.

use std::path::{Path, PathBuf};

use studypack_content::flatten_rel_path;
use studypack_shared::{Result, StudypackError};

use crate::resources::ResourceKind;

/// Navigation index filename at the site root.
pub const DATABASE_FILE: &str = "database.json";

/// Shard directory name under the site root.
pub const CONTENT_DIR: &str = "content";

/// Lesson shard directory name under `content/`.
pub const LESSONS_DIR: &str = "lessons";

/// Resolved output locations for one site.
#[derive(Debug, Clone)]
pub struct SiteLayout {
    site_root: PathBuf,
}

impl SiteLayout {
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        Self {
            site_root: site_root.into(),
        }
    }

    pub fn site_root(&self) -> &Path {
        &self.site_root
    }

    pub fn database_path(&self) -> PathBuf {
        self.site_root.join(DATABASE_FILE)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.site_root.join(CONTENT_DIR)
    }

    /// Absolute destination of a topic's lesson shard.
    pub fn lesson_shard_path(&self, rel_path: &str) -> PathBuf {
        self.content_dir()
            .join(LESSONS_DIR)
            .join(format!("{}.json", flatten_rel_path(rel_path)))
    }

    /// Site-root-relative lesson reference stored as `contentPath`.
    /// Never carries a leading segment, so it resolves from the site root.
    pub fn lesson_content_ref(&self, rel_path: &str) -> String {
        format!(
            "{CONTENT_DIR}/{LESSONS_DIR}/{}.json",
            flatten_rel_path(rel_path)
        )
    }

    /// Destination directory for one resource kind under one topic.
    pub fn resource_dir(&self, kind: ResourceKind, rel_path: &str) -> PathBuf {
        self.content_dir().join(kind.output_dir()).join(rel_path)
    }
}

/// Write a pretty-printed JSON file, creating parent directories as needed.
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| StudypackError::parse(format!("JSON serialization failed: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StudypackError::io(parent, e))?;
    }

    std::fs::write(path, json).map_err(|e| StudypackError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_paths_flatten_rel_path() {
        let layout = SiteLayout::new("docs");
        assert_eq!(
            layout.lesson_shard_path("uni/cardiology"),
            PathBuf::from("docs/content/lessons/uni__cardiology.json")
        );
        assert_eq!(
            layout.lesson_content_ref("uni/cardiology"),
            "content/lessons/uni__cardiology.json"
        );
    }

    #[test]
    fn resource_dirs_per_kind() {
        let layout = SiteLayout::new("docs");
        assert_eq!(
            layout.resource_dir(ResourceKind::CollectionQuizzes, "uni/cardiology"),
            PathBuf::from("docs/content/quizzes/uni/cardiology")
        );
        assert_eq!(
            layout.resource_dir(ResourceKind::FlashcardDecks, "uni"),
            PathBuf::from("docs/content/flashcards/uni")
        );
    }
}
