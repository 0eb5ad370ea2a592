//! # markvue-render
//!
//! Component templating and index code generation for markvue: layout
//! resolution, attribute construction, the meta-info script block, and the
//! generated route-table / post-index / typings artifacts.

pub mod artifacts;
pub mod format;
pub mod templater;

pub use artifacts::{
    generate_posts, generate_prerender, generate_routes, route_entry, write_typings, RouteEntry,
    AUTO_POSTS, AUTO_POSTS_TYPINGS, AUTO_ROUTES, AUTO_ROUTES_TYPINGS, PRERENDER_ROUTES,
};
pub use format::{format_code, format_markup};
pub use templater::{compile, RenderError, Templater};
