//! # markvue-core
//!
//! Core library for the markvue site generator.
//!
//! This crate provides the build pipeline: scanning the input tree,
//! parsing front-matter, resolving per-document metadata, and classifying
//! documents for routing and chronological navigation. Template rendering
//! and artifact code generation live in `markvue-render`.

pub mod builder;
pub mod classify;
pub mod config;
pub mod fileinfo;
pub mod files;
pub mod frontmatter;
pub mod markdown;
pub mod metadata;
pub mod models;
pub mod slug;

pub use builder::{BuildError, SiteBuilder};
pub use classify::{classify, ClassifiedDocuments, OrderedViews};
pub use config::{Config, ConfigError, OutputType};
pub use fileinfo::FileInfo;
pub use files::{write_if_absent, FilesError, WriteOutcome};
pub use frontmatter::{parse_front_matter, FrontmatterError};
pub use markdown::MarkdownRenderer;
pub use models::{
    Author, FrontMatter, Metadata, PostEntry, ResolvedDocument, StyleOverride,
};
pub use slug::pascal_to_kebab;
