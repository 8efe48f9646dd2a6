//! Uniform response envelopes.
//!
//! Every handler answers with an [`ApiResponse`] (one value) or a
//! [`PagedApiResponse`] (one page of a collection). Both carry an optional
//! message and a set of [`Links`] next to the payload, plus a presentation
//! hint that is never serialized and only matters to the HTML side of
//! [`Negotiate`](crate::negotiate::Negotiate).

use serde::Serialize;

use assetdesk_domain::page::PageOptions;

use super::link::{Link, Links};
use crate::negotiate::{HtmlSource, Renderable};

/// Presentation attached to an envelope; skipped on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Presentation {
    html: HtmlSource,
    title: Option<String>,
    item_base: Option<String>,
}

/// Envelope for a single value, or for no value at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub response: Option<T>,
    pub message: Option<String>,
    pub links: Links,
    #[serde(skip)]
    presentation: Presentation,
}

impl<T> ApiResponse<T> {
    pub fn new(response: T) -> Self {
        Self {
            response: Some(response),
            message: None,
            links: Links::new(),
            presentation: Presentation::default(),
        }
    }

    /// An envelope with `response: null`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            response: None,
            message: None,
            links: Links::new(),
            presentation: Presentation::default(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_link(mut self, name: impl Into<String>, link: Link) -> Self {
        self.links.insert(name, link);
        self
    }

    #[must_use]
    pub fn with_html(mut self, html: HtmlSource) -> Self {
        self.presentation.html = html;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.presentation.title = Some(title.into());
        self
    }

    /// URL prefix of the items in a collection payload.
    #[must_use]
    pub fn with_item_base(mut self, base: impl Into<String>) -> Self {
        self.presentation.item_base = Some(base.into());
        self
    }
}

impl<T: Serialize> Renderable for ApiResponse<T> {
    fn html_source(&self) -> HtmlSource {
        self.presentation.html.clone()
    }

    fn title(&self) -> Option<&str> {
        self.presentation.title.as_deref()
    }

    fn item_base(&self) -> Option<&str> {
        self.presentation.item_base.as_deref()
    }
}

/// Envelope for one page of a collection.
///
/// Navigation links are computed at construction:
///
/// 1. the collection root link, always first;
/// 2. `Prior` when `page > 1`;
/// 3. `Next` when the page came back full (`response.len() == per_page`).
///
/// The `Next` rule is a heuristic: a collection whose size is an exact
/// multiple of `per_page` advertises one empty trailing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagedApiResponse<T> {
    pub response: Vec<T>,
    pub message: Option<String>,
    pub links: Links,
    pub page_options: PageOptions,
    #[serde(skip)]
    presentation: Presentation,
}

impl<T> PagedApiResponse<T> {
    /// Wrap one page of items and compute the navigation links relative to
    /// `root`'s URL.
    pub fn new(
        response: Vec<T>,
        page_options: PageOptions,
        root_name: impl Into<String>,
        root: Link,
    ) -> Self {
        let base = root.url().to_string();
        let mut paged = Self {
            response,
            message: None,
            links: Links::new(),
            page_options,
            presentation: Presentation::default(),
        };

        paged.links.insert(root_name, root);
        if page_options.page > 1 {
            let url = format!("{base}?{}", paged.prior_page_fragment());
            paged.links.insert("Prior", Link::new(url, "Prior Page"));
        }
        if u32::try_from(paged.response.len()).is_ok_and(|len| len == page_options.per_page) {
            let url = format!("{base}?{}", paged.next_page_fragment());
            paged.links.insert("Next", Link::new(url, "Next Page"));
        }
        paged
    }

    /// Query fragment addressing the following page.
    #[must_use]
    pub fn next_page_fragment(&self) -> String {
        page_fragment(
            i64::from(self.page_options.page) + 1,
            self.page_options.per_page,
        )
    }

    /// Query fragment addressing the preceding page.
    #[must_use]
    pub fn prior_page_fragment(&self) -> String {
        page_fragment(
            i64::from(self.page_options.page) - 1,
            self.page_options.per_page,
        )
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Append a link after the navigation links.
    #[must_use]
    pub fn with_link(mut self, name: impl Into<String>, link: Link) -> Self {
        self.links.insert(name, link);
        self
    }

    #[must_use]
    pub fn with_html(mut self, html: HtmlSource) -> Self {
        self.presentation.html = html;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.presentation.title = Some(title.into());
        self
    }

    /// URL prefix of the items in a collection payload.
    #[must_use]
    pub fn with_item_base(mut self, base: impl Into<String>) -> Self {
        self.presentation.item_base = Some(base.into());
        self
    }
}

impl<T: Serialize> Renderable for PagedApiResponse<T> {
    fn html_source(&self) -> HtmlSource {
        self.presentation.html.clone()
    }

    fn title(&self) -> Option<&str> {
        self.presentation.title.as_deref()
    }

    fn item_base(&self) -> Option<&str> {
        self.presentation.item_base.as_deref()
    }
}

fn page_fragment(page: i64, per_page: u32) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .append_pair("per_page", &per_page.to_string())
        .finish()
}
