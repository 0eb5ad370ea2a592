//! Input/output path bookkeeping for a single document.
//!
//! Everything here is a pure string/path transform; no filesystem access.

use std::path::{Component, Path, PathBuf};

/// A document location split into folder, stem, and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    full_path: PathBuf,
}

impl FileInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            full_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.full_path
    }

    /// Containing folder (empty path for bare file names).
    pub fn folder(&self) -> &Path {
        self.full_path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        self.full_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    pub fn extension(&self) -> &str {
        self.full_path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }

    /// Map this input location to its output location: the `input_root`
    /// prefix is replaced by `output_root` and the extension by
    /// `extension`.
    pub fn with_output(&self, input_root: &Path, output_root: &Path, extension: &str) -> FileInfo {
        let folder = replace_root(self.folder(), input_root, output_root);
        FileInfo::new(folder.join(format!("{}.{}", self.stem(), extension)))
    }
}

/// Replace the `from` prefix of `dir` with `to`.
///
/// Trailing separators on either root are irrelevant (the comparison is
/// component-wise). A path that is not under `from` is returned unchanged
/// rather than being an error.
pub fn replace_root(dir: &Path, from: &Path, to: &Path) -> PathBuf {
    match dir.strip_prefix(from) {
        Ok(rest) => to.join(rest),
        Err(_) => dir.to_path_buf(),
    }
}

/// Derive the site-relative permalink for a document.
///
/// An explicit front-matter permalink wins verbatim. Otherwise the
/// permalink is the output folder relative to `output_root`, joined with
/// the id: `/`-separated, prefixed with `/`, never suffixed with `/`.
pub fn permalink(
    id: &str,
    output_folder: &Path,
    output_root: &Path,
    explicit: Option<&str>,
) -> String {
    if let Some(permalink) = explicit {
        return permalink.to_string();
    }

    // outside the output root the folder contributes nothing
    let relative = output_folder
        .strip_prefix(output_root)
        .unwrap_or_else(|_| Path::new(""));

    let mut link = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            link.push('/');
            link.push_str(&part.to_string_lossy());
        }
    }
    link.push('/');
    link.push_str(id);
    link
}
