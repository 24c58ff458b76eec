//! Shared types, error model, and configuration for studypack.
//!
//! This crate is the foundation depended on by all other studypack crates.
//! It provides:
//! - [`StudypackError`] — the unified error type
//! - Domain types ([`Database`], [`TopicNode`], [`ResourceRef`], [`LessonShard`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, PathsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{Result, StudypackError};
pub use types::{
    Database, InstitutionMeta, LessonShard, ResourceRef, TopicNode, TopicResources,
};
