//! Canonical metadata resolution from front-matter, filename, and config.

use crate::fileinfo::{self, FileInfo};
use crate::models::{FrontMatter, Metadata};
use crate::slug::pascal_to_kebab;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::path::Path;

/// Resolve the canonical metadata record for one document.
///
/// `output` is the document's mapped output location; `output_root` is the
/// build's output directory, used for permalink derivation.
pub fn resolve(
    front_matter: Option<&FrontMatter>,
    output: &FileInfo,
    output_root: &Path,
) -> Metadata {
    let id = pascal_to_kebab(output.stem());
    let permalink = fileinfo::permalink(
        &id,
        output.folder(),
        output_root,
        front_matter.and_then(|fm| fm.permalink.as_deref()),
    );

    let mut metadata = Metadata {
        id,
        permalink,
        ..Metadata::default()
    };

    let Some(fm) = front_matter else {
        return metadata;
    };

    metadata.is_component = fm.is_component;
    metadata.style = fm.style.clone();
    metadata.layout = fm.layout.clone().filter(|layout| !layout.is_empty());
    metadata.meta_info = resolved_meta_info(fm);

    // the nested meta-info title always wins over the root-level title
    metadata.title = fm
        .meta_info
        .as_ref()
        .and_then(meta_title)
        .or_else(|| fm.title.clone());

    metadata.description = fm.description.clone();
    metadata.date = fm.date.as_deref().and_then(parse_date);
    metadata.date_formatted = match (metadata.date, fm.date_format.as_deref()) {
        (Some(date), Some(pattern)) => format_date(date, pattern),
        _ => None,
    };
    metadata.categories = fm.categories.clone();
    metadata.tags = fm.tags.clone();
    metadata.author = fm.author.clone();
    metadata.extra = fm.extra.clone();

    metadata
}

fn meta_title(meta_info: &Map<String, Value>) -> Option<String> {
    meta_info
        .get("title")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// The meta-info map as the script block sees it: the root-level title is
/// backfilled when the map has no title of its own.
fn resolved_meta_info(fm: &FrontMatter) -> Option<Map<String, Value>> {
    let mut map = fm.meta_info.clone().unwrap_or_default();
    if let Some(title) = &fm.title {
        if !map.contains_key("title") {
            map.insert("title".to_string(), Value::String(title.clone()));
        }
    }
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Parse a front-matter date. A string that matches none of the accepted
/// shapes yields `None` — the document is treated as undated rather than
/// failing the build.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(date.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Apply a strftime pattern, rejecting patterns chrono cannot format.
fn format_date(date: DateTime<Utc>, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::warn!("invalid dateFormat pattern '{}', skipping", pattern);
        return None;
    }
    Some(date.format_with_items(items.into_iter()).to_string())
}
