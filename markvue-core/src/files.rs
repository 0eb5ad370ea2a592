//! Filesystem helpers: input-tree scanning, strict reads, idempotent writes.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum FilesError {
    #[error("input file {0} does not exist")]
    Missing(PathBuf),

    #[error("{0} is not a file")]
    NotAFile(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// List markdown files under `root` in a stable scan order.
///
/// Entries matching one of `ignore_patterns` (regexes over the path
/// relative to `root`) are skipped.
pub fn list_markdown_files(root: &Path, ignore_patterns: &[String]) -> Vec<PathBuf> {
    let ignores = compile_ignore_patterns(ignore_patterns);
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .to_string();
        if should_ignore(&relative, &ignores) {
            tracing::debug!("ignoring {} due to ignore_patterns", relative);
            continue;
        }

        files.push(entry.path().to_path_buf());
    }

    files
}

/// Read a source file, surfacing missing-file and not-a-file conditions as
/// typed errors. Used by the concurrent resolve stage.
pub async fn read_text(path: &Path) -> Result<String, FilesError> {
    match tokio::fs::metadata(path).await {
        Err(_) => return Err(FilesError::Missing(path.to_path_buf())),
        Ok(meta) if !meta.is_file() => return Err(FilesError::NotAFile(path.to_path_buf())),
        Ok(_) => {}
    }
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FilesError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Result of an idempotent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped,
}

/// Write `content` to `path` unless the file already exists.
///
/// Existing files are left untouched so they can be hand-edited after the
/// first generation; callers report the skip instead of treating it as an
/// error.
pub fn write_if_absent(path: &Path, content: &str) -> io::Result<WriteOutcome> {
    if path.exists() {
        return Ok(WriteOutcome::Skipped);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(WriteOutcome::Written)
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        match Regex::new(pattern) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("invalid ignore pattern '{}': {}", pattern, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}
