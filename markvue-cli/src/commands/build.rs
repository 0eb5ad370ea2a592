//! Build command implementation.

use anyhow::{Context, Result};
use markvue_core::{ClassifiedDocuments, Config, OutputType, SiteBuilder};
use markvue_render::{self as render, Templater};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;

/// Run a full build: resolve documents, render components, assemble the
/// route table and post index.
pub async fn build_site(config_path: &Path, clean: bool) -> Result<()> {
    tracing::info!("loading config from {}", config_path.display());
    let config = Config::from_file(config_path).context("failed to load configuration")?;

    let output_dir = config.output_dir();
    if clean && output_dir.exists() {
        std::fs::remove_dir_all(&output_dir)
            .with_context(|| format!("failed to clean {}", output_dir.display()))?;
    }
    std::fs::create_dir_all(&output_dir).context("failed to create output directory")?;

    let builder = SiteBuilder::new(config.clone());
    let documents = builder
        .resolve()
        .await
        .context("failed to resolve documents")?;

    match config.output_type {
        OutputType::Vue => build_vue(&config, &documents).await,
        OutputType::Html => build_html(&documents).await,
    }
}

/// Vue output: one component per document plus the index artifacts.
async fn build_vue(config: &Config, documents: &ClassifiedDocuments) -> Result<()> {
    let templater = Templater::load(config).context("failed to load templates")?;

    let mut writes: JoinSet<Result<()>> = JoinSet::new();

    for doc in &documents.components {
        let content = templater.generate(doc, None, None)?;
        queue_write(&mut writes, doc.output.path().to_path_buf(), content);
    }
    for doc in &documents.views.undated {
        let content = templater.generate(doc, None, None)?;
        queue_write(&mut writes, doc.output.path().to_path_buf(), content);
    }
    for (index, doc) in documents.views.dated.iter().enumerate() {
        let (prev, next) = documents.views.neighbors(index);
        let content = templater.generate(doc, prev, next)?;
        queue_write(&mut writes, doc.output.path().to_path_buf(), content);
    }

    // the index artifacts need the complete ordered set
    let routes: Vec<render::RouteEntry> = documents
        .views
        .in_route_order()
        .map(|doc| render::route_entry(doc, config))
        .collect();
    let posts: Vec<_> = documents
        .views
        .in_route_order()
        .map(|doc| doc.metadata.post_entry())
        .collect();

    let output_dir = config.output_dir();
    queue_write(
        &mut writes,
        output_dir.join(render::AUTO_ROUTES),
        render::generate_routes(&routes, config.lazy_routes)?,
    );
    queue_write(
        &mut writes,
        output_dir.join(render::AUTO_POSTS),
        render::generate_posts(&posts)?,
    );
    if config.prerender {
        queue_write(
            &mut writes,
            output_dir.join(render::PRERENDER_ROUTES),
            render::generate_prerender(&routes),
        );
    }

    if config.typescript {
        render::write_typings(&output_dir).context("failed to write typings")?;
    }

    let file_count = writes.len();
    while let Some(joined) = writes.join_next().await {
        joined??;
    }

    tracing::info!("✓ built {} files", file_count);
    tracing::info!("✓ output written to {}", output_dir.display());

    Ok(())
}

/// Plain HTML output: rendered bodies only, no index artifacts.
async fn build_html(documents: &ClassifiedDocuments) -> Result<()> {
    let mut writes: JoinSet<Result<()>> = JoinSet::new();

    for doc in documents
        .components
        .iter()
        .chain(documents.views.in_route_order())
    {
        queue_write(
            &mut writes,
            doc.output.path().to_path_buf(),
            doc.html.clone(),
        );
    }

    let file_count = writes.len();
    while let Some(joined) = writes.join_next().await {
        joined??;
    }

    tracing::info!("✓ wrote {} html files", file_count);
    Ok(())
}

/// Queue one output write; independent writes run concurrently and are not
/// ordered relative to one another.
fn queue_write(writes: &mut JoinSet<Result<()>>, path: PathBuf, content: String) {
    writes.spawn(async move {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!("wrote {}", path.display());
        Ok(())
    });
}
