//! Front-matter splitting and decoding from markdown sources.

use crate::models::FrontMatter;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("invalid start of front-matter in {path}: '---' must be followed by a new line")]
    MalformedStart { path: PathBuf },

    #[error(
        "unterminated front-matter in {path}: expected a closing '---' line followed by a new line"
    )]
    MalformedEnd { path: PathBuf },

    #[error("invalid front-matter YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Split raw file text into optional front-matter and body.
///
/// A metadata block opens with a literal `---` at the very start of the
/// file and closes with a line consisting of exactly `---`; both
/// delimiters tolerate `\n` and `\r\n` terminators. Text without an
/// opening delimiter is returned whole as the body. An opener without a
/// closer is a fatal formatting error, never silently treated as body.
///
/// `path` is only used for error context.
///
/// # Example
///
/// ```
/// use markvue_core::frontmatter::parse_front_matter;
/// use std::path::Path;
///
/// let text = "---\ntitle: My Post\n---\n# Hello\n";
/// let (fm, body) = parse_front_matter(text, Path::new("post.md")).unwrap();
/// assert_eq!(fm.unwrap().title.as_deref(), Some("My Post"));
/// assert_eq!(body, "# Hello\n");
/// ```
pub fn parse_front_matter<'a>(
    text: &'a str,
    path: &Path,
) -> Result<(Option<FrontMatter>, &'a str), FrontmatterError> {
    let Some((raw, body)) = split_front_matter(text, path)? else {
        return Ok((None, text));
    };

    // an empty or comment-only block reads as YAML `null`; decode through
    // Option so it yields an all-default record instead of a type error
    let front_matter: Option<FrontMatter> =
        serde_yaml::from_str(raw).map_err(|source| FrontmatterError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok((Some(front_matter.unwrap_or_default()), body))
}

/// Locate the delimited block, returning `(raw_front_matter, body)` slices.
fn split_front_matter<'a>(
    text: &'a str,
    path: &Path,
) -> Result<Option<(&'a str, &'a str)>, FrontmatterError> {
    if !text.starts_with(DELIMITER) {
        return Ok(None);
    }

    let block_start = match after_line_break(text, DELIMITER.len()) {
        Some(index) => index,
        None => {
            return Err(FrontmatterError::MalformedStart {
                path: path.to_path_buf(),
            })
        }
    };

    let mut cursor = block_start;
    while cursor < text.len() {
        let rest = &text[cursor..];
        let (line_len, terminator_len) = match rest.find('\n') {
            Some(i) if i > 0 && rest.as_bytes()[i - 1] == b'\r' => (i - 1, 2),
            Some(i) => (i, 1),
            None => (rest.len(), 0),
        };

        if &rest[..line_len] == DELIMITER {
            // the closing delimiter must itself be terminated
            if terminator_len == 0 {
                break;
            }
            let raw = &text[block_start..cursor];
            let body = &text[cursor + line_len + terminator_len..];
            return Ok(Some((raw, body)));
        }

        if terminator_len == 0 {
            break;
        }
        cursor += line_len + terminator_len;
    }

    Err(FrontmatterError::MalformedEnd {
        path: path.to_path_buf(),
    })
}

/// Index just past a `\n` or `\r\n` at `at`, if one is there.
fn after_line_break(text: &str, at: usize) -> Option<usize> {
    let rest = &text[at..];
    if rest.starts_with('\n') {
        Some(at + 1)
    } else if rest.starts_with("\r\n") {
        Some(at + 2)
    } else {
        None
    }
}
