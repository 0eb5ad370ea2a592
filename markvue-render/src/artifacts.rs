//! Generated index artifacts: route table, post index, prerender list,
//! and typings companions.

use crate::format;
use crate::templater::{
    compile, RenderError, POSTS_TEMPLATE, POST_TYPINGS, ROUTES_TEMPLATE, ROUTE_TYPINGS,
};
use markvue_core::{write_if_absent, Config, PostEntry, ResolvedDocument, WriteOutcome};
use minijinja::context;
use std::io;
use std::path::{Component, Path};

pub const AUTO_ROUTES: &str = "auto-routes.js";
pub const AUTO_ROUTES_TYPINGS: &str = "auto-routes.d.ts";
pub const AUTO_POSTS: &str = "auto-posts.js";
pub const AUTO_POSTS_TYPINGS: &str = "auto-posts.d.ts";
pub const PRERENDER_ROUTES: &str = "prerender-routes.js";

/// One generated route: an import statement plus a route-table object
/// literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub component: String,
    pub file: String,
}

impl RouteEntry {
    /// `{ path: "...", name: "...", component: X }`
    pub fn object_literal(&self) -> String {
        format!(
            "{{ path: {}, name: {}, component: {} }}",
            js_string(&self.path),
            js_string(&self.name),
            self.component
        )
    }

    pub fn import_statement(&self) -> String {
        format!("import {} from {};", self.component, js_string(&self.file))
    }

    /// Webpack-style lazy import with a chunk name per route.
    pub fn lazy_import_statement(&self) -> String {
        format!(
            "const {} = () => import(/* webpackChunkName: {} */ {});",
            self.component,
            js_string(&self.name),
            js_string(&self.file)
        )
    }
}

/// Derive the route entry for a view. The import path is rewritten to the
/// module alias only when the output falls under the project root folder.
pub fn route_entry(doc: &ResolvedDocument, config: &Config) -> RouteEntry {
    RouteEntry {
        path: doc.metadata.permalink.clone(),
        name: doc.metadata.id.clone(),
        component: doc.output.stem().to_string(),
        file: alias_import_path(doc.output.path(), &config.root_folder, &config.module_alias),
    }
}

fn alias_import_path(path: &Path, root_folder: &Path, alias: &str) -> String {
    match path.strip_prefix(root_folder) {
        Ok(rest) => format!("{}/{}", alias, forward_slashes(rest)),
        Err(_) => forward_slashes(path),
    }
}

fn forward_slashes(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

/// JS string literal with proper escaping.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("\"\""))
}

/// Generate the route-table module. `routes` must already be in route
/// order (undated first, then dated chronologically).
pub fn generate_routes(routes: &[RouteEntry], lazy: bool) -> Result<String, RenderError> {
    let imports = routes
        .iter()
        .map(|route| {
            if lazy {
                route.lazy_import_statement()
            } else {
                route.import_statement()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    let list = routes
        .iter()
        .map(|route| format!("  {}", route.object_literal()))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format::format_code(&compile(
        ROUTES_TEMPLATE,
        context! { imports, list },
    )?))
}

/// Generate the post-index module. Entries carrying nothing beyond bare
/// identity are omitted entirely (they keep their route).
pub fn generate_posts(posts: &[PostEntry]) -> Result<String, RenderError> {
    let entries = posts
        .iter()
        .filter(|post| !post.is_bare())
        .map(|post| serde_json::to_string_pretty(post).map(|json| format!("  {}", indent(&json))))
        .collect::<Result<Vec<_>, _>>()?
        .join(",\n");

    Ok(format::format_code(&compile(
        POSTS_TEMPLATE,
        context! { entries },
    )?))
}

fn indent(json: &str) -> String {
    json.replace('\n', "\n  ")
}

/// `module.exports = ["/a", "/b"];` list for prerender plugins.
pub fn generate_prerender(routes: &[RouteEntry]) -> String {
    let paths = routes
        .iter()
        .map(|route| js_string(&route.path))
        .collect::<Vec<_>>()
        .join(", ");
    format!("module.exports = [{}];\n", paths)
}

/// Write both typings companions unless they already exist. Existing files
/// are reported and left untouched — generate once, hand-edit after.
pub fn write_typings(output_dir: &Path) -> io::Result<()> {
    for (name, content) in [
        (AUTO_ROUTES_TYPINGS, ROUTE_TYPINGS),
        (AUTO_POSTS_TYPINGS, POST_TYPINGS),
    ] {
        let path = output_dir.join(name);
        match write_if_absent(&path, content)? {
            WriteOutcome::Written => tracing::info!("generated {}", path.display()),
            WriteOutcome::Skipped => {
                tracing::info!("{} already exists, left untouched", path.display())
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use markvue_core::{FileInfo, Metadata};
    use std::fs;
    use tempfile::tempdir;

    fn view(id: &str, output: &str) -> ResolvedDocument {
        ResolvedDocument {
            input: FileInfo::new(format!("src/md/{id}.md")),
            output: FileInfo::new(output),
            metadata: Metadata {
                id: id.to_string(),
                permalink: format!("/{id}"),
                ..Metadata::default()
            },
            html: String::new(),
            scan_index: 0,
        }
    }

    #[test]
    fn test_route_entry_rendering() {
        let entry = RouteEntry {
            path: "/first-post".into(),
            name: "first-post".into(),
            component: "FirstPost".into(),
            file: "@/markvue/FirstPost.vue".into(),
        };

        assert_eq!(
            entry.object_literal(),
            r#"{ path: "/first-post", name: "first-post", component: FirstPost }"#
        );
        assert_eq!(
            entry.import_statement(),
            r#"import FirstPost from "@/markvue/FirstPost.vue";"#
        );
        assert_eq!(
            entry.lazy_import_statement(),
            r#"const FirstPost = () => import(/* webpackChunkName: "first-post" */ "@/markvue/FirstPost.vue");"#
        );
    }

    #[test]
    fn test_import_path_alias_rewrite() {
        let config = Config::with_dirs("src/md", "src/markvue");

        let under_root = view("post", "src/markvue/Post.vue");
        assert_eq!(
            route_entry(&under_root, &config).file,
            "@/markvue/Post.vue"
        );

        let outside_root = view("post", "elsewhere/Post.vue");
        assert_eq!(
            route_entry(&outside_root, &config).file,
            "elsewhere/Post.vue"
        );
    }

    #[test]
    fn test_generate_routes_module() {
        let routes = vec![
            RouteEntry {
                path: "/about".into(),
                name: "about".into(),
                component: "About".into(),
                file: "@/markvue/About.vue".into(),
            },
            RouteEntry {
                path: "/first-post".into(),
                name: "first-post".into(),
                component: "FirstPost".into(),
                file: "@/markvue/FirstPost.vue".into(),
            },
        ];

        let module = generate_routes(&routes, false).unwrap();
        assert!(module.starts_with(r#"import About from "@/markvue/About.vue";"#));
        assert!(module.contains("export default ["));
        let about = module.find("name: \"about\"").unwrap();
        let first = module.find("name: \"first-post\"").unwrap();
        assert!(about < first);
    }

    #[test]
    fn test_generate_routes_lazy() {
        let routes = vec![RouteEntry {
            path: "/about".into(),
            name: "about".into(),
            component: "About".into(),
            file: "@/markvue/About.vue".into(),
        }];

        let module = generate_routes(&routes, true).unwrap();
        assert!(module.contains("const About = () => import("));
        assert!(!module.contains("import About from"));
    }

    #[test]
    fn test_generate_posts_omits_bare_entries() {
        let titled = PostEntry {
            id: "post".into(),
            permalink: "/post".into(),
            title: Some("Post".into()),
            description: None,
            date: None,
            categories: None,
            tags: None,
        };
        let bare = PostEntry {
            id: "empty".into(),
            permalink: "/empty".into(),
            title: None,
            description: None,
            date: None,
            categories: None,
            tags: None,
        };

        let module = generate_posts(&[titled, bare]).unwrap();
        assert!(module.contains(r#""id": "post""#));
        assert!(!module.contains("empty"));
        // absent optional fields never serialize as null
        assert!(!module.contains("null"));
    }

    #[test]
    fn test_generate_prerender() {
        let routes = vec![
            RouteEntry {
                path: "/a".into(),
                name: "a".into(),
                component: "A".into(),
                file: "@/A.vue".into(),
            },
            RouteEntry {
                path: "/b".into(),
                name: "b".into(),
                component: "B".into(),
                file: "@/B.vue".into(),
            },
        ];

        assert_eq!(
            generate_prerender(&routes),
            "module.exports = [\"/a\", \"/b\"];\n"
        );
    }

    #[test]
    fn test_write_typings_is_idempotent() {
        let dir = tempdir().unwrap();

        write_typings(dir.path()).unwrap();
        let routes_path = dir.path().join(AUTO_ROUTES_TYPINGS);
        assert_eq!(fs::read_to_string(&routes_path).unwrap(), ROUTE_TYPINGS);

        // hand-edited content survives the second run
        fs::write(&routes_path, "// customized\n").unwrap();
        write_typings(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&routes_path).unwrap(), "// customized\n");
    }
}
