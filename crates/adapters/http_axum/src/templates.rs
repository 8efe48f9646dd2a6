//! Compiled page templates and the registry that looks them up by name.
//!
//! Templates are compiled with `askama`, so the set of names is fixed at
//! build time. The registry maps each name to its render function and keeps
//! a [`TemplateCache`] of existence probes, which the negotiation layer uses
//! to decide whether a derived template path can be rendered.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use askama::Template;

use crate::negotiate::Renderable;
use crate::response::Links;
use crate::view::{ItemView, LinkView, link_views};

/// Values available to every template next to `item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globals {
    pub app_name: String,
    pub version: String,
    pub menu: Vec<LinkView>,
}

impl Globals {
    pub fn new(app_name: impl Into<String>, version: impl Into<String>, menu: &Links) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
            menu: link_views(menu),
        }
    }
}

/// Errors raised while rendering a named template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown template {0}")]
    Unknown(String),

    #[error("failed to serialize value")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to render template")]
    Askama(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

#[derive(Template)]
#[template(path = "page/list.html")]
struct ListPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

#[derive(Template)]
#[template(path = "page/detail.html")]
struct DetailPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

#[derive(Template)]
#[template(path = "users/list.html")]
struct UserListPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

#[derive(Template)]
#[template(path = "users/detail.html")]
struct UserDetailPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

#[derive(Template)]
#[template(path = "groups/list.html")]
struct GroupListPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

#[derive(Template)]
#[template(path = "groups/detail.html")]
struct GroupDetailPage<'a> {
    globals: &'a Globals,
    item: &'a ItemView,
}

type RenderFn = fn(&Globals, &ItemView) -> askama::Result<String>;

fn render_index(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    IndexPage { globals, item }.render()
}

fn render_list(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    ListPage { globals, item }.render()
}

fn render_detail(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    DetailPage { globals, item }.render()
}

fn render_user_list(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    UserListPage { globals, item }.render()
}

fn render_user_detail(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    UserDetailPage { globals, item }.render()
}

fn render_group_list(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    GroupListPage { globals, item }.render()
}

fn render_group_detail(globals: &Globals, item: &ItemView) -> askama::Result<String> {
    GroupDetailPage { globals, item }.render()
}

static PAGES: &[(&str, RenderFn)] = &[
    ("index.html", render_index),
    ("page/list.html", render_list),
    ("page/detail.html", render_detail),
    ("users/list.html", render_user_list),
    ("users/detail.html", render_user_detail),
    ("groups/list.html", render_group_list),
    ("groups/detail.html", render_group_detail),
];

fn lookup(name: &str) -> Option<RenderFn> {
    PAGES
        .iter()
        .find(|(page, _)| *page == name)
        .map(|(_, render)| *render)
}

/// Remembered answers to "does template `name` exist?".
///
/// Only names of registered templates are stored, so the cache never holds
/// more entries than there are pages. Entries are idempotent, so concurrent
/// probes of the same name may both write; the last write wins.
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<HashMap<String, bool>>,
}

impl TemplateCache {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    pub fn insert(&self, name: impl Into<String>, exists: bool) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), exists);
    }

    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The compiled templates plus their globals and existence cache.
#[derive(Debug)]
pub struct TemplateRegistry {
    globals: Globals,
    cache: TemplateCache,
}

impl TemplateRegistry {
    #[must_use]
    pub fn new(globals: Globals) -> Self {
        Self {
            globals,
            cache: TemplateCache::default(),
        }
    }

    /// Whether a template called `name` can be rendered.
    ///
    /// Names taken from the request (`?format=`) are unbounded, so misses are
    /// answered without being stored.
    pub fn exists(&self, name: &str) -> bool {
        if let Some(known) = self.cache.get(name) {
            return known;
        }
        let Some((page, _)) = PAGES.iter().find(|(page, _)| *page == name) else {
            return false;
        };
        self.cache.insert(*page, true);
        true
    }

    /// Render `name` with `item` and the globals.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unknown`] for a name outside the registry, or
    /// the underlying template error.
    pub fn render_view(&self, name: &str, item: &ItemView) -> Result<String, RenderError> {
        let render = lookup(name).ok_or_else(|| RenderError::Unknown(name.to_string()))?;
        Ok(render(&self.globals, item)?)
    }

    #[cfg(test)]
    #[must_use]
    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }
}

/// Shared handle to the [`TemplateRegistry`], held in application state.
#[derive(Debug, Clone)]
pub struct Templates(Arc<TemplateRegistry>);

impl Templates {
    #[must_use]
    pub fn new(globals: Globals) -> Self {
        Self(Arc::new(TemplateRegistry::new(globals)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.0.exists(name)
    }

    /// Render `name` with `value` bound as `item`.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if `value` cannot be serialized, the name is
    /// unknown, or the template fails.
    pub fn render<T: Renderable>(&self, name: &str, value: &T) -> Result<String, RenderError> {
        let json = serde_json::to_value(value)?;
        let item = ItemView::from_value(&json, value.title(), value.item_base());
        self.0.render_view(name, &item)
    }

    #[cfg(test)]
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Link;
    use crate::view::{FieldView, RowView};

    fn globals() -> Globals {
        Globals::new(
            "assetdesk",
            "0.1.0",
            &[
                ("Devices", Link::new("/devices", "Devices")),
                ("Issues", Link::new("/issues", "Issues")),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn should_cache_known_template_names() {
        let registry = TemplateRegistry::new(globals());
        assert!(registry.cache().is_empty());

        assert!(registry.exists("users/list.html"));
        assert!(registry.exists("users/list.html"));
        assert!(!registry.exists("users/gallery.html"));

        assert_eq!(registry.cache().len(), 1);
        assert_eq!(registry.cache().get("users/list.html"), Some(true));
        assert_eq!(registry.cache().get("users/gallery.html"), None);
    }

    #[test]
    fn should_not_grow_cache_with_unknown_names() {
        let registry = TemplateRegistry::new(globals());

        for n in 0..1000 {
            assert!(!registry.exists(&format!("users/junk{n}.html")));
        }
        for (name, _) in PAGES {
            assert!(registry.exists(name));
        }

        assert_eq!(registry.cache().len(), PAGES.len());
    }

    #[test]
    fn should_trust_cached_answer() {
        let registry = TemplateRegistry::new(globals());
        registry.cache().insert("page/list.html", false);
        assert!(!registry.exists("page/list.html"));
    }

    #[test]
    fn should_reject_unknown_template() {
        let registry = TemplateRegistry::new(globals());
        let result = registry.render_view("nope.html", &ItemView::default());
        assert!(matches!(result, Err(RenderError::Unknown(name)) if name == "nope.html"));
    }

    #[test]
    fn should_render_every_registered_page() {
        let registry = TemplateRegistry::new(globals());
        for (name, _) in PAGES {
            let html = registry.render_view(name, &ItemView::default()).unwrap();
            assert!(html.contains("assetdesk"), "{name} misses the app name");
        }
    }

    #[test]
    fn should_render_menu_and_rows_in_list_page() {
        let registry = TemplateRegistry::new(globals());
        let item = ItemView {
            title: "Device List".to_string(),
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![RowView {
                href: "/devices/1".to_string(),
                cells: vec!["1".to_string(), "<ThinkPad>".to_string()],
            }],
            ..ItemView::default()
        };

        let html = registry.render_view("page/list.html", &item).unwrap();

        assert!(html.contains("<h1>Device List</h1>"));
        assert!(html.contains("href=\"/issues\""));
        assert!(html.contains("href=\"/devices/1\""));
        assert!(!html.contains("<ThinkPad>"));
        assert!(html.contains("ThinkPad"));
    }

    #[test]
    fn should_render_fields_in_detail_page() {
        let registry = TemplateRegistry::new(globals());
        let item = ItemView {
            message: "Issue Details".to_string(),
            fields: vec![FieldView {
                name: "status".to_string(),
                value: "open".to_string(),
            }],
            ..ItemView::default()
        };

        let html = registry.render_view("page/detail.html", &item).unwrap();

        assert!(html.contains("Issue Details"));
        assert!(html.contains("<dt>status</dt>"));
        assert!(html.contains("<dd>open</dd>"));
    }
}
