//! Template-facing view of a serialized envelope.
//!
//! Templates are compiled against one shape, [`ItemView`], whatever resource
//! is being shown. The view is built from the JSON form of the value so any
//! serializable payload renders without a dedicated template.

use serde_json::{Map, Value};

use crate::response::{Link, Links};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub name: String,
    pub url: String,
    pub title: String,
    pub method: String,
    pub render_hint: bool,
}

impl LinkView {
    fn from_link(name: &str, link: &Link) -> Self {
        Self {
            name: name.to_string(),
            url: link.url().to_string(),
            title: link.title().to_string(),
            method: link.method().to_string(),
            render_hint: link.render_hint(),
        }
    }

    fn from_json(name: &str, value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            name: name.to_string(),
            url: text("url"),
            title: text("title"),
            method: text("method"),
            render_hint: value
                .get("render_hint")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

/// Convert a set of links into their view form.
#[must_use]
pub fn link_views(links: &Links) -> Vec<LinkView> {
    links
        .iter()
        .map(|(name, link)| LinkView::from_link(name, link))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Detail page of the row, empty when unknown.
    pub href: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub value: String,
}

/// Everything a page template can show about one value.
///
/// Collection payloads fill `columns` and `rows`; single objects fill
/// `fields`. Missing text is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemView {
    pub title: String,
    pub message: String,
    pub links: Vec<LinkView>,
    pub columns: Vec<String>,
    pub rows: Vec<RowView>,
    pub fields: Vec<FieldView>,
    /// Picture URL of a single object, if it has one.
    pub image: String,
}

impl ItemView {
    /// Build the view of a serialized value.
    ///
    /// Objects carrying both `response` and `links` are treated as
    /// envelopes; anything else is shown as the payload itself.
    #[must_use]
    pub fn from_value(value: &Value, title: Option<&str>, item_base: Option<&str>) -> Self {
        let mut view = Self::default();

        let payload = match value {
            Value::Object(map) if map.contains_key("response") && map.contains_key("links") => {
                view.message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                if let Some(Value::Object(links)) = map.get("links") {
                    view.links = links
                        .iter()
                        .map(|(name, link)| LinkView::from_json(name, link))
                        .collect();
                }
                map.get("response").unwrap_or(&Value::Null)
            }
            other => other,
        };

        match payload {
            Value::Array(items) => view.fill_rows(items, item_base),
            Value::Object(object) => view.fill_fields(object),
            Value::Null => {}
            scalar => view.fields.push(FieldView {
                name: "value".to_string(),
                value: cell(scalar),
            }),
        }

        view.title = title
            .map(str::to_string)
            .or_else(|| view.links.first().map(|link| link.title.clone()))
            .unwrap_or_default();
        view
    }

    fn fill_rows(&mut self, items: &[Value], item_base: Option<&str>) {
        let Some(Value::Object(first)) = items.first() else {
            self.columns = vec!["value".to_string()];
            self.rows = items
                .iter()
                .map(|item| RowView {
                    href: String::new(),
                    cells: vec![cell(item)],
                })
                .collect();
            return;
        };

        self.columns = first.keys().cloned().collect();
        self.rows = items
            .iter()
            .map(|item| {
                let cells = self
                    .columns
                    .iter()
                    .map(|column| item.get(column).map(cell).unwrap_or_default())
                    .collect();
                let href = match (item_base, item.get("id")) {
                    (Some(base), Some(id)) if !id.is_null() => format!("{base}/{}", cell(id)),
                    _ => String::new(),
                };
                RowView { href, cells }
            })
            .collect();
    }

    fn fill_fields(&mut self, object: &Map<String, Value>) {
        self.fields = object
            .iter()
            .map(|(name, value)| FieldView {
                name: name.clone(),
                value: cell(value),
            })
            .collect();
        self.image = object
            .get("picture")
            .and_then(Value::as_str)
            .filter(|url| url.starts_with("http"))
            .unwrap_or_default()
            .to_string();
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
