//! Post-build artifact audit.
//!
//! Verifies the site-serving contract: `database.json` parses, every
//! `contentPath` target exists, and every resource shard reconstructable
//! from the tree keys and `ResourceRef.id` is present on disk. This is the
//! same join the browser-side viewers perform when building fetch URLs.

use std::path::Path;

use tracing::{debug, instrument};

use studypack_shared::{Database, Result, StudypackError, TopicNode};

use crate::layout::SiteLayout;
use crate::resources::ResourceKind;

/// Validate an emitted site. Returns the parsed database on success.
#[instrument(skip_all, fields(site_root = %site_root.display()))]
pub fn validate_site(site_root: &Path) -> Result<Database> {
    let layout = SiteLayout::new(site_root);
    let database_path = layout.database_path();

    let content = std::fs::read_to_string(&database_path).map_err(|e| {
        StudypackError::validation(format!("missing or unreadable {}: {e}", database_path.display()))
    })?;
    let database: Database = serde_json::from_str(&content)
        .map_err(|e| StudypackError::validation(format!("invalid database.json: {e}")))?;

    for (key, node) in &database.tree {
        validate_node(&layout, key, node)?;
    }

    debug!(institutions = database.tree.len(), "site validated");
    Ok(database)
}

fn validate_node(layout: &SiteLayout, rel_path: &str, node: &TopicNode) -> Result<()> {
    if node.has_index != node.content_path.is_some() {
        return Err(StudypackError::validation(format!(
            "node {rel_path}: hasIndex and contentPath disagree"
        )));
    }

    if let Some(content_path) = &node.content_path {
        let shard = layout.site_root().join(content_path);
        if !shard.is_file() {
            return Err(StudypackError::validation(format!(
                "node {rel_path}: lesson shard not found: {content_path}"
            )));
        }
    }

    if let Some(resources) = &node.resources {
        for kind in ResourceKind::ALL {
            let refs = match kind {
                ResourceKind::CollectionQuizzes => &resources.collection_quizzes,
                ResourceKind::FlashcardDecks => &resources.flashcard_decks,
            };
            for resource in refs {
                let shard = layout
                    .resource_dir(kind, rel_path)
                    .join(format!("{}.json", resource.id));
                if !shard.is_file() {
                    return Err(StudypackError::validation(format!(
                        "node {rel_path}: {kind} shard not found for id '{}'",
                        resource.id
                    )));
                }
            }
        }
    }

    for (key, child) in &node.children {
        validate_node(layout, &format!("{rel_path}/{key}"), child)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::pipeline::{BuildConfig, SilentProgress, build};

    struct Fixture {
        root: PathBuf,
        config: BuildConfig,
    }

    fn built_site() -> Fixture {
        let root = std::env::temp_dir().join(format!("sp-validate-test-{}", uuid::Uuid::now_v7()));
        let config = BuildConfig {
            content_root: root.join("content").join("universities"),
            site_root: root.join("docs"),
        };

        let topic = config.content_root.join("uni").join("cardiology");
        std::fs::create_dir_all(topic.join("_collection_quiz")).unwrap();
        std::fs::write(
            topic.join("index.md"),
            "---\ntitle: Cardiology\n---\nHeart basics",
        )
        .unwrap();
        std::fs::write(
            topic.join("_collection_quiz").join("kaf.json"),
            r#"{"title":"KAF","questions":[]}"#,
        )
        .unwrap();

        build(&config, &SilentProgress).unwrap();
        Fixture { root, config }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    #[test]
    fn fresh_build_validates() {
        let fx = built_site();
        let db = validate_site(&fx.config.site_root).unwrap();
        assert_eq!(db.tree.len(), 1);
    }

    #[test]
    fn missing_database_rejected() {
        let fx = built_site();
        let err = validate_site(&fx.root.join("elsewhere")).unwrap_err();
        assert!(err.to_string().contains("database.json"));
    }

    #[test]
    fn deleted_lesson_shard_rejected() {
        let fx = built_site();
        std::fs::remove_file(
            fx.config
                .site_root
                .join("content/lessons/uni__cardiology.json"),
        )
        .unwrap();

        let err = validate_site(&fx.config.site_root).unwrap_err();
        assert!(err.to_string().contains("lesson shard not found"));
    }

    #[test]
    fn deleted_resource_shard_rejected() {
        let fx = built_site();
        std::fs::remove_file(
            fx.config
                .site_root
                .join("content/quizzes/uni/cardiology/kaf.json"),
        )
        .unwrap();

        let err = validate_site(&fx.config.site_root).unwrap_err();
        assert!(err.to_string().contains("quizzes shard not found"));
    }
}
