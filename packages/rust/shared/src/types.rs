//! Core domain types for studypack navigation artifacts.
//!
//! These are build-time values: constructed once per pipeline run, serialized
//! into `database.json` and the content shards, then discarded. The serialized
//! key casing and the omit-when-empty rules are a wire contract with the
//! browser-side viewers and must not change.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Root artifact written to `database.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// Build timestamp (RFC 3339).
    pub generated_at: DateTime<Utc>,
    /// Institution trees keyed by canonical lowercase directory name.
    pub tree: BTreeMap<String, TopicNode>,
}

/// One directory in the content tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNode {
    /// Institution display name; only set at institution roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display title; front matter `title` or a formatted directory name.
    #[serde(default)]
    pub label: String,
    /// Short description; present only when the node has an index file
    /// (empty string when the front matter declares none).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// True iff the directory has its own `index.md`.
    #[serde(default)]
    pub has_index: bool,
    /// Site-root-relative path to the externalized lesson shard;
    /// present iff `has_index`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<String>,
    /// Quiz/deck references; the key is absent entirely when both kinds
    /// are empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<TopicResources>,
    /// Child topics keyed by canonical lowercase directory name.
    /// Always serialized, even when empty.
    #[serde(default)]
    pub children: BTreeMap<String, TopicNode>,
    /// Navigation-hub marker; serialized only when true.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_branch: bool,
}

/// Per-topic resource references. Each kind is omitted when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicResources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collection_quizzes: Vec<ResourceRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashcard_decks: Vec<ResourceRef>,
}

impl TopicResources {
    /// True when neither kind has any entries.
    pub fn is_empty(&self) -> bool {
        self.collection_quizzes.is_empty() && self.flashcard_decks.is_empty()
    }
}

/// A single quiz bank or flashcard deck reference.
///
/// `id` is the lowercase, extension-stripped source filename and is the only
/// join key viewers use to construct shard fetch URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    pub title: String,
}

/// Externalized lesson body, one shard file per indexed topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonShard {
    pub markdown_content: String,
}

/// Optional `meta.json` at an institution root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstitutionMeta {
    #[serde(default)]
    pub name: Option<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_serializes_minimal_shape() {
        let node = TopicNode {
            label: "Anatomy".into(),
            ..TopicNode::default()
        };

        let json = serde_json::to_value(&node).expect("serialize");
        let obj = json.as_object().expect("object");

        // Absent optionals stay absent, not null/empty.
        assert!(!obj.contains_key("name"));
        assert!(!obj.contains_key("summary"));
        assert!(!obj.contains_key("contentPath"));
        assert!(!obj.contains_key("resources"));
        assert!(!obj.contains_key("isBranch"));

        // children is always present, hasIndex always explicit.
        assert!(obj.contains_key("children"));
        assert_eq!(obj["hasIndex"], false);
        assert_eq!(obj["label"], "Anatomy");
    }

    #[test]
    fn node_serializes_camel_case_keys() {
        let node = TopicNode {
            label: "Cardiology".into(),
            summary: Some(String::new()),
            has_index: true,
            content_path: Some("content/lessons/uni__cardiology.json".into()),
            resources: Some(TopicResources {
                collection_quizzes: vec![ResourceRef {
                    id: "kaf".into(),
                    title: "KAF".into(),
                }],
                flashcard_decks: vec![],
            }),
            is_branch: true,
            ..TopicNode::default()
        };

        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["hasIndex"], true);
        assert_eq!(json["contentPath"], "content/lessons/uni__cardiology.json");
        assert_eq!(json["isBranch"], true);
        assert_eq!(json["resources"]["collectionQuizzes"][0]["id"], "kaf");
        // Empty kind is dropped from an otherwise non-empty resources object.
        assert!(json["resources"].get("flashcardDecks").is_none());
    }

    #[test]
    fn database_roundtrip() {
        let mut tree = BTreeMap::new();
        tree.insert(
            "uni".to_string(),
            TopicNode {
                name: Some("Example University".into()),
                label: "Uni".into(),
                ..TopicNode::default()
            },
        );
        let db = Database {
            generated_at: Utc::now(),
            tree,
        };

        let json = serde_json::to_string_pretty(&db).expect("serialize");
        assert!(json.contains("generatedAt"));

        let parsed: Database = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(
            parsed.tree["uni"].name.as_deref(),
            Some("Example University")
        );
    }

    #[test]
    fn lesson_shard_key_name() {
        let shard = LessonShard {
            markdown_content: "Heart basics".into(),
        };
        let json = serde_json::to_value(&shard).expect("serialize");
        assert_eq!(json["markdownContent"], "Heart basics");
    }

    #[test]
    fn institution_meta_tolerates_missing_name() {
        let meta: InstitutionMeta = serde_json::from_str("{}").expect("parse");
        assert!(meta.name.is_none());

        let meta: InstitutionMeta =
            serde_json::from_str(r#"{"name":"Example University"}"#).expect("parse");
        assert_eq!(meta.name.as_deref(), Some("Example University"));
    }
}
