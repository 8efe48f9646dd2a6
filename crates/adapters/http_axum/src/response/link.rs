//! Hypermedia links attached to response envelopes.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A navigable action: where to go, what to call it and how to get there.
///
/// Links are built once and never mutated; the consuming `with_*` methods
/// return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    url: String,
    title: String,
    method: String,
    render_hint: bool,
}

impl Link {
    /// A plain `GET` link.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            method: "GET".to_string(),
            render_hint: false,
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Ask HTML renderers to show the link as a button.
    #[must_use]
    pub fn with_render_hint(mut self) -> Self {
        self.render_hint = true;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn render_hint(&self) -> bool {
        self.render_hint
    }
}

/// Named links in insertion order.
///
/// Inserting a name that is already present replaces that link where it
/// stands. Serializes as a JSON object keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<(String, Link)>);

impl Links {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, link: Link) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = link,
            None => self.0.push((name, link)),
        }
    }

    #[must_use]
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Link> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, link)| link)
    }

    #[cfg(test)]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.0.iter().map(|(name, link)| (name.as_str(), link))
    }
}

impl<N: Into<String>> FromIterator<(N, Link)> for Links {
    fn from_iter<I: IntoIterator<Item = (N, Link)>>(iter: I) -> Self {
        let mut links = Self::new();
        for (name, link) in iter {
            links.insert(name, link);
        }
        links
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, link) in &self.0 {
            map.serialize_entry(name, link)?;
        }
        map.end()
    }
}
