//! Content model structs for front-matter, resolved metadata, and index entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::fileinfo::FileInfo;

/// Per-document style override.
///
/// The distinction between "not specified" and "explicitly disabled"
/// (`style: null` in front-matter) must survive all the way into rendering:
/// an unset style falls back to the configured default, a disabled style
/// suppresses the class attribute entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StyleOverride {
    /// The front-matter carried no `style` key.
    #[default]
    Unset,

    /// `style: null` — suppress the class attribute, ignoring any default.
    Disabled,

    /// `style: <name>` — use this class verbatim (may be empty).
    Named(String),
}

impl StyleOverride {
    pub fn is_unset(&self) -> bool {
        matches!(self, StyleOverride::Unset)
    }
}

fn style_override<'de, D>(deserializer: D) -> Result<StyleOverride, D::Error>
where
    D: Deserializer<'de>,
{
    // The field being present at all is what distinguishes Disabled from
    // Unset; serde only calls this when the key exists.
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(match value {
        None => StyleOverride::Disabled,
        Some(name) => StyleOverride::Named(name),
    })
}

/// Structured author name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

/// Raw front-matter exactly as authored (camelCase keys on the wire).
///
/// All fields are optional; unknown keys are ignored. `date` stays a string
/// here — it is parsed during metadata resolution so that a malformed date
/// degrades to "undated" instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,

    /// Opaque nested metadata destined for head/meta injection.
    #[serde(default)]
    pub meta_info: Option<Map<String, Value>>,

    #[serde(default, deserialize_with = "style_override")]
    pub style: StyleOverride,

    #[serde(default)]
    pub layout: Option<String>,

    #[serde(default)]
    pub is_component: bool,

    #[serde(default)]
    pub permalink: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    /// strftime pattern applied to `date` to produce `dateFormatted`.
    #[serde(default)]
    pub date_format: Option<String>,

    #[serde(default)]
    pub categories: Option<Vec<String>>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub author: Option<Author>,

    /// Opaque pass-through payload exposed to custom layouts.
    #[serde(default)]
    pub extra: Option<Value>,
}

/// Canonical per-document record derived from front-matter, filename, and
/// configuration.
///
/// Optional fields are `Option` and are omitted from every serialized form
/// when absent, so generated code never contains `null`/`undefined`
/// literals for missing data.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Kebab-case slug derived from the filename stem.
    pub id: String,

    /// Site-relative route path: forward slashes, `/`-prefixed, never
    /// `/`-suffixed. Unique across all non-component documents in a build.
    pub permalink: String,

    /// Reusable component rather than a routable page.
    pub is_component: bool,

    pub style: StyleOverride,
    pub layout: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub date_formatted: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub author: Option<Author>,

    /// Resolved meta-info: the authored map with the root title backfilled
    /// when the map carries no title of its own.
    pub meta_info: Option<Map<String, Value>>,

    pub extra: Option<Value>,
}

impl Metadata {
    /// Derive the post-index entry for this document.
    pub fn post_entry(&self) -> PostEntry {
        PostEntry {
            id: self.id.clone(),
            permalink: self.permalink.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.map(|d| d.to_rfc3339()),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// One entry of the generated post index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostEntry {
    pub id: String,
    pub permalink: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO 8601 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PostEntry {
    /// True when nothing beyond bare identity is populated. Bare entries
    /// are dropped from the post index (they still get a route).
    pub fn is_bare(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.categories.is_none()
            && self.tags.is_none()
    }
}

/// A fully resolved document: metadata plus rendered body, ready for
/// templating and artifact assembly.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub input: FileInfo,
    pub output: FileInfo,
    pub metadata: Metadata,
    pub html: String,

    /// Position in the input scan; keeps ordering deterministic after the
    /// concurrent resolve stage joins.
    pub scan_index: usize,
}
