//! Lazily materialized, generated single-file trees.
//!
//! [`filesystem::GeneratedSingletonFileTree`] exposes one generated file through
//! a visitor-based tree interface and rewrites it only when its content changes.
//! The remaining modules drive it from a YAML declaration file.

pub mod application;
pub mod cli;
pub mod config;
pub mod ext;
pub mod filesystem;
