//! Core compilation pipeline for studypack.
//!
//! This crate ties the content tree scan, resource sharding, and index
//! assembly into the end-to-end `build` workflow, plus a post-build
//! `validate` audit of the emitted artifacts.

pub mod layout;
pub mod pipeline;
pub mod resources;
pub mod scanner;
pub mod validate;
