//! Component assembly: layout resolution, attribute construction, and the
//! optional meta-info script block.

use crate::format;
use markvue_core::{Author, Config, Metadata, ResolvedDocument, StyleOverride};
use minijinja::context;
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Built-in component template: an `id`/`class` attribute pair around the
/// rendered body.
pub const COMPONENT_TEMPLATE: &str = include_str!("../templates/component.vue.jinja");

/// Built-in script template for the meta-info block.
pub const SCRIPT_TEMPLATE: &str = include_str!("../templates/script.vue.jinja");

pub const ROUTES_TEMPLATE: &str = include_str!("../templates/routes.js.jinja");
pub const POSTS_TEMPLATE: &str = include_str!("../templates/posts.js.jinja");
pub const ROUTE_TYPINGS: &str = include_str!("../templates/routes.d.ts");
pub const POST_TYPINGS: &str = include_str!("../templates/posts.d.ts");

/// Naming convention for custom layout files.
pub const LAYOUT_SUFFIX: &str = ".vue.jinja";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to read layout {path}: {source}")]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Interpolate `template` with `context`.
///
/// Auto-escaping is off: the pipeline emits markup and code verbatim, and
/// escaping is the author's responsibility inside layouts.
pub fn compile(template: &str, context: impl Serialize) -> Result<String, RenderError> {
    let mut env = minijinja::Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);
    env.add_template("inline", template)?;
    let rendered = env
        .get_template("inline")?
        .render(minijinja::Value::from_serialize(&context))?;
    Ok(rendered)
}

/// Per-build template set: the built-in templates plus custom layouts
/// discovered under the input's layouts folder.
pub struct Templater {
    config: Config,
    layouts: HashMap<String, String>,
}

impl Templater {
    /// Load the template set, discovering custom layouts on disk. A
    /// missing layouts folder simply yields no layouts.
    pub fn load(config: &Config) -> Result<Self, RenderError> {
        let layouts = load_layouts(&config.layouts_dir())?;
        Ok(Self {
            config: config.clone(),
            layouts,
        })
    }

    /// Look up a loaded layout by its kebab-case key.
    pub fn layout(&self, name: &str) -> Option<&str> {
        self.layouts.get(name).map(String::as_str)
    }

    /// Assemble the final component text for one document. `prev`/`next`
    /// are the chronological neighbors, present only for dated views.
    pub fn generate(
        &self,
        doc: &ResolvedDocument,
        prev: Option<&Metadata>,
        next: Option<&Metadata>,
    ) -> Result<String, RenderError> {
        let template = self.generate_template(doc, prev, next)?;
        match self.generate_script(doc)? {
            Some(script) => Ok(format!("{template}\n<script>\n{script}</script>\n")),
            None => Ok(template),
        }
    }

    fn generate_template(
        &self,
        doc: &ResolvedDocument,
        prev: Option<&Metadata>,
        next: Option<&Metadata>,
    ) -> Result<String, RenderError> {
        let metadata = &doc.metadata;
        // clear the extra new-line at the end of the rendered HTML
        let html = doc.html.strip_suffix('\n').unwrap_or(&doc.html);

        let layout = metadata
            .layout
            .as_deref()
            .and_then(|name| self.layouts.get(name));

        if let Some(layout) = layout {
            let rendered = compile(
                layout.as_str(),
                LayoutContext {
                    content: html,
                    post: PostContext::with_neighbors(metadata, prev, next),
                    style: self.effective_style(metadata),
                },
            )?;
            return Ok(format::format_markup(&rendered));
        }

        let rendered = compile(
            COMPONENT_TEMPLATE,
            context! { attr => self.attr_string(metadata), content => html },
        )?;
        Ok(format::format_markup(&rendered))
    }

    /// The `<script>` block is appended only when the build outputs meta
    /// information and this document resolved a non-empty meta-info map.
    fn generate_script(&self, doc: &ResolvedDocument) -> Result<Option<String>, RenderError> {
        if !self.config.output_meta {
            return Ok(None);
        }
        let Some(meta_info) = &doc.metadata.meta_info else {
            return Ok(None);
        };
        if meta_info.is_empty() {
            return Ok(None);
        }

        let serialized =
            serde_json::to_string_pretty(&serde_json::Value::Object(meta_info.clone()))?;
        let script = compile(SCRIPT_TEMPLATE, context! { meta_info => serialized })?;
        Ok(Some(format::format_code(&script)))
    }

    /// Style as the default template sees it, honoring the tri-state: an
    /// unset style falls back to the configured default, `style: null`
    /// suppresses the class entirely, a named style (even empty) is used
    /// verbatim.
    fn effective_style<'a>(&'a self, metadata: &'a Metadata) -> Option<&'a str> {
        match &metadata.style {
            StyleOverride::Named(name) => Some(name.as_str()),
            StyleOverride::Disabled => None,
            StyleOverride::Unset => self.config.default_style.as_deref(),
        }
    }

    fn attr_string(&self, metadata: &Metadata) -> String {
        match self.effective_style(metadata) {
            Some(class) => format!(r#"id="{}" class="{}""#, metadata.id, class),
            None => format!(r#"id="{}""#, metadata.id),
        }
    }
}

#[derive(Serialize)]
struct LayoutContext<'a> {
    content: &'a str,
    post: PostContext<'a>,

    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
}

/// Post context exposed to custom layouts. Absent fields are omitted so a
/// layout sees `undefined`, never `null`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostContext<'a> {
    id: &'a str,
    permalink: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a [String]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<&'a Author>,

    /// Epoch milliseconds, the shape date filters in layouts expect.
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date_formatted: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<Box<PostContext<'a>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<Box<PostContext<'a>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<&'a serde_json::Value>,
}

impl<'a> PostContext<'a> {
    fn with_neighbors(
        metadata: &'a Metadata,
        prev: Option<&'a Metadata>,
        next: Option<&'a Metadata>,
    ) -> Self {
        let mut ctx = Self::leaf(metadata);
        ctx.prev = prev.map(|m| Box::new(Self::leaf(m)));
        ctx.next = next.map(|m| Box::new(Self::leaf(m)));
        ctx
    }

    fn leaf(metadata: &'a Metadata) -> Self {
        Self {
            id: &metadata.id,
            permalink: &metadata.permalink,
            title: metadata.title.as_deref(),
            description: metadata.description.as_deref(),
            categories: metadata.categories.as_deref(),
            tags: metadata.tags.as_deref(),
            author: metadata.author.as_ref(),
            date: metadata.date.map(|d| d.timestamp_millis()),
            date_formatted: metadata.date_formatted.as_deref(),
            prev: None,
            next: None,
            extra: metadata.extra.as_ref(),
        }
    }
}

/// Read `*.vue.jinja` files from the layouts folder; the lookup key is the
/// kebab-cased base name up to the first `.`.
fn load_layouts(dir: &Path) -> Result<HashMap<String, String>, RenderError> {
    let mut layouts = HashMap::new();
    if !dir.is_dir() {
        return Ok(layouts);
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|source| RenderError::LayoutRead {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.ends_with(LAYOUT_SUFFIX) {
            continue;
        }

        let base = file_name.split('.').next().unwrap_or(file_name);
        let key = markvue_core::pascal_to_kebab(base);
        let content = std::fs::read_to_string(&path).map_err(|source| RenderError::LayoutRead {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("loaded layout '{}' from {}", key, path.display());
        layouts.insert(key, content);
    }

    Ok(layouts)
}
