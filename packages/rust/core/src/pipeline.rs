//! End-to-end `build` pipeline: content tree → shards + `database.json`.
//!
//! Failure policy is deliberately asymmetric to the item-level tolerance in
//! [`crate::resources`]: a broken single quiz item must not block a release,
//! but a broken institution tree aborts the whole run. Per-institution scan
//! errors therefore propagate uncaught to the caller.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, instrument};

use studypack_content::canonical_key;
use studypack_shared::{Database, Result, StudypackError, TopicNode};

use crate::layout::{SiteLayout, write_json};
use crate::scanner::{ScanContext, scan_directory};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root directory holding per-institution content trees.
    pub content_root: PathBuf,
    /// Site root where `database.json` and content shards are written.
    pub site_root: PathBuf,
}

/// Summary of a completed pipeline run.
#[derive(Debug)]
pub struct BuildResult {
    /// Path of the written navigation index.
    pub database_path: PathBuf,
    /// Number of institution trees in the index.
    pub institutions: usize,
    /// Total topic nodes across all trees (institution roots included).
    pub topics: usize,
    /// Lesson shards written (one per indexed topic).
    pub lesson_shards: usize,
    /// Quiz and deck shards written.
    pub resource_shards: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each institution tree is scanned.
    fn institution_scanned(&self, key: &str, current: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn institution_scanned(&self, _key: &str, _current: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

/// Run the full build.
///
/// 1. Enumerate institution directories under the content root
/// 2. Scan each into an owned tree (fatal on error)
/// 3. Stamp `generatedAt` and write `database.json`
#[instrument(skip_all, fields(content_root = %config.content_root.display(), site_root = %config.site_root.display()))]
pub fn build(config: &BuildConfig, progress: &dyn ProgressReporter) -> Result<BuildResult> {
    let start = Instant::now();
    let layout = SiteLayout::new(&config.site_root);

    info!("starting build");

    let content_dir = layout.content_dir();
    std::fs::create_dir_all(&content_dir).map_err(|e| StudypackError::io(&content_dir, e))?;

    progress.phase("Scanning institutions");
    let ctx = ScanContext {
        content_root: &config.content_root,
        layout: &layout,
    };

    let mut tree = BTreeMap::new();
    let entries = std::fs::read_dir(&config.content_root)
        .map_err(|e| StudypackError::io(&config.content_root, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| StudypackError::io(&config.content_root, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }
        if !entry.path().is_dir() {
            continue;
        }

        let node = scan_directory(&entry.path(), true, &ctx)?;
        let key = canonical_key(&name);
        progress.institution_scanned(&key, tree.len() + 1);
        tree.insert(key, node);
    }

    let database = Database {
        generated_at: Utc::now(),
        tree,
    };

    progress.phase("Writing navigation index");
    let database_path = layout.database_path();
    write_json(&database_path, &database)?;

    let mut counts = TreeCounts::default();
    for node in database.tree.values() {
        counts.tally(node);
    }

    let result = BuildResult {
        database_path,
        institutions: database.tree.len(),
        topics: counts.topics,
        lesson_shards: counts.lesson_shards,
        resource_shards: counts.resource_shards,
        elapsed: start.elapsed(),
    };

    info!(
        institutions = result.institutions,
        topics = result.topics,
        lesson_shards = result.lesson_shards,
        resource_shards = result.resource_shards,
        path = %result.database_path.display(),
        "build complete"
    );
    progress.done(&result);

    Ok(result)
}

#[derive(Default)]
struct TreeCounts {
    topics: usize,
    lesson_shards: usize,
    resource_shards: usize,
}

impl TreeCounts {
    fn tally(&mut self, node: &TopicNode) {
        self.topics += 1;
        if node.has_index {
            self.lesson_shards += 1;
        }
        if let Some(resources) = &node.resources {
            self.resource_shards +=
                resources.collection_quizzes.len() + resources.flashcard_decks.len();
        }
        for child in node.children.values() {
            self.tally(child);
        }
    }
}
