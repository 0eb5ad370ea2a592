//! Build orchestration: scan, parse, resolve, classify.

use crate::classify::{classify, ClassifiedDocuments};
use crate::config::Config;
use crate::fileinfo::FileInfo;
use crate::files::{self, FilesError};
use crate::frontmatter::{parse_front_matter, FrontmatterError};
use crate::markdown::MarkdownRenderer;
use crate::metadata;
use crate::models::ResolvedDocument;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;
use tokio::task::JoinSet;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file error: {0}")]
    Files(#[from] FilesError),

    #[error("front-matter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("duplicate permalink {permalink} ({path} collides with an earlier document)")]
    DuplicatePermalink { permalink: String, path: PathBuf },

    #[error("document task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Main site builder. Runs the Scanning → Parsing → Resolving →
/// Classifying stages; rendering and artifact assembly happen downstream
/// on the returned set.
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolve the whole input tree.
    ///
    /// Per-document work is fanned out as independent tasks with no
    /// ordering dependency; the joined set is restored to scan order
    /// before classification, so downstream artifact ordering never
    /// depends on task completion order. The first failing document
    /// aborts the build.
    pub async fn resolve(&self) -> Result<ClassifiedDocuments, BuildError> {
        let input_root = self.config.input_dir();
        let files = files::list_markdown_files(&input_root, &self.config.ignore_patterns);
        tracing::info!("found {} markdown files", files.len());

        let mut tasks: JoinSet<Result<ResolvedDocument, BuildError>> = JoinSet::new();
        for (scan_index, path) in files.into_iter().enumerate() {
            let config = self.config.clone();
            tasks.spawn(async move { resolve_document(path, scan_index, &config).await });
        }

        let mut documents = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            documents.push(joined??);
        }

        // join_next yields in completion order; restore scan order
        documents.sort_by_key(|doc| doc.scan_index);

        self.check_permalinks(&documents)?;

        let classified = classify(documents);
        tracing::info!(
            "classified {} views and {} components",
            classified.view_count(),
            classified.components.len()
        );
        Ok(classified)
    }

    /// Permalinks must be unique across all non-component documents; a
    /// collision is a logic error in the content, surfaced instead of
    /// silently resolved.
    fn check_permalinks(&self, documents: &[ResolvedDocument]) -> Result<(), BuildError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for doc in documents.iter().filter(|d| !d.metadata.is_component) {
            if !seen.insert(doc.metadata.permalink.as_str()) {
                tracing::warn!("duplicate permalink: {}", doc.metadata.permalink);
                return Err(BuildError::DuplicatePermalink {
                    permalink: doc.metadata.permalink.clone(),
                    path: doc.input.path().to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

/// Parse and resolve a single document. Private to its task until the
/// join point.
async fn resolve_document(
    path: PathBuf,
    scan_index: usize,
    config: &Config,
) -> Result<ResolvedDocument, BuildError> {
    let text = files::read_text(&path).await?;
    let (front_matter, body) = parse_front_matter(&text, &path)?;

    let input = FileInfo::new(&path);
    let output_root = config.output_dir();
    let output = input.with_output(
        &config.input_dir(),
        &output_root,
        config.output_type.extension(),
    );

    let html = MarkdownRenderer::new().render(body);
    let metadata = metadata::resolve(front_matter.as_ref(), &output, &output_root);

    tracing::debug!(path = %path.display(), id = %metadata.id, "resolved document");

    Ok(ResolvedDocument {
        input,
        output,
        metadata,
        html,
        scan_index,
    })
}
