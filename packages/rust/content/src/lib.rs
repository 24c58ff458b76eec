//! Lesson index reading and front matter extraction.
//!
//! A topic directory may carry an optional `index.md`: a leading
//! `---`-delimited YAML block with descriptive metadata (`title`, `summary`)
//! followed by the markdown body. The body is never kept in the navigation
//! tree; the scanner externalizes it into a lesson shard.

pub mod paths;

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use studypack_shared::{Result, StudypackError};

pub use paths::{canonical_key, canonical_rel_path, flatten_rel_path, format_label, resource_id};

/// The designated body-content file inside a topic directory.
pub const INDEX_FILE: &str = "index.md";

/// Parsed contents of a topic's `index.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexContent {
    /// Front matter `title`, or a formatted directory name fallback.
    pub label: String,
    /// Front matter `summary`, or the empty string.
    pub summary: String,
    /// Markdown body after the front matter block.
    pub body: String,
}

/// YAML front matter schema. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

/// Read and parse a topic directory's `index.md`.
///
/// Returns `Ok(None)` when the file is absent — a missing index is not an
/// error. Malformed front matter YAML is recovered: the metadata is treated
/// as empty (label falls back to the formatted directory name) and the body
/// after the delimiter block is preserved.
pub fn extract_index(dir: &Path) -> Result<Option<IndexContent>> {
    let path = dir.join(INDEX_FILE);
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StudypackError::io(&path, e)),
    };

    let (front, body) = split_front_matter(&text);
    let front_matter = match front {
        Some(yaml) if yaml.trim().is_empty() => FrontMatter::default(),
        Some(yaml) => serde_yaml::from_str::<FrontMatter>(yaml).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "malformed front matter, treating as empty");
            FrontMatter::default()
        }),
        None => FrontMatter::default(),
    };

    let label = front_matter
        .title
        .unwrap_or_else(|| format_label(&dir_base_name(dir)));
    let summary = front_matter.summary.unwrap_or_default();

    debug!(path = %path.display(), label = %label, body_len = body.len(), "index extracted");

    Ok(Some(IndexContent {
        label,
        summary,
        body: body.to_string(),
    }))
}

/// Split a document into its leading YAML front matter block and body.
///
/// The block must open with `---` as the very first line and close with a
/// `---` line; without both delimiters the whole text is the body.
fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Unterminated block: no front matter, keep everything.
    (None, text)
}

fn dir_base_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_topic(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("sp-content-test-{}", uuid::Uuid::now_v7()))
            .join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        if let Some(parent) = dir.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn missing_index_is_none() {
        let dir = temp_topic("cardiology");
        assert_eq!(extract_index(&dir).unwrap(), None);
        cleanup(&dir);
    }

    #[test]
    fn full_front_matter_extracted() {
        let dir = temp_topic("cardiology");
        std::fs::write(
            dir.join(INDEX_FILE),
            "---\ntitle: Cardiology\nsummary: The heart and vessels\n---\nHeart basics",
        )
        .unwrap();

        let index = extract_index(&dir).unwrap().expect("present");
        assert_eq!(index.label, "Cardiology");
        assert_eq!(index.summary, "The heart and vessels");
        assert_eq!(index.body, "Heart basics");
        cleanup(&dir);
    }

    #[test]
    fn no_front_matter_falls_back_to_dir_name() {
        let dir = temp_topic("heart-failure");
        std::fs::write(dir.join(INDEX_FILE), "Just a body\n").unwrap();

        let index = extract_index(&dir).unwrap().expect("present");
        assert_eq!(index.label, "Heart Failure");
        assert_eq!(index.summary, "");
        assert_eq!(index.body, "Just a body\n");
        cleanup(&dir);
    }

    #[test]
    fn malformed_yaml_keeps_body() {
        let dir = temp_topic("ecg");
        std::fs::write(
            dir.join(INDEX_FILE),
            "---\ntitle: [unclosed\n---\nBody survives",
        )
        .unwrap();

        let index = extract_index(&dir).unwrap().expect("present");
        assert_eq!(index.label, "Ecg");
        assert_eq!(index.body, "Body survives");
        cleanup(&dir);
    }

    #[test]
    fn unterminated_front_matter_is_body() {
        let dir = temp_topic("renal");
        std::fs::write(dir.join(INDEX_FILE), "--- not a block\ntext").unwrap();

        let index = extract_index(&dir).unwrap().expect("present");
        assert_eq!(index.body, "--- not a block\ntext");
        cleanup(&dir);
    }

    #[test]
    fn split_handles_crlf() {
        let (front, body) = split_front_matter("---\r\ntitle: X\r\n---\r\nbody");
        assert_eq!(front, Some("title: X\r\n"));
        assert_eq!(body, "body");
    }
}
