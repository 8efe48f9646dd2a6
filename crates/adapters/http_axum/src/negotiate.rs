//! Accept-header content negotiation.
//!
//! Handlers take a [`Negotiate`] extractor and hand it their finished
//! envelope. Clients that do not ask for HTML get the envelope as JSON.
//! Browsers get it rendered through a template when the envelope declares an
//! HTML representation ([`HtmlSource`]) that resolves to something
//! renderable, and JSON otherwise.

use std::borrow::Cow;
use std::convert::Infallible;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::templates::Templates;

/// Media types that select the HTML branch, matched as substrings.
const HTML_MEDIA_TYPES: [&str; 2] = ["text/html", "application/xhtml+xml"];

/// Format used for derived template paths when neither the request nor the
/// value names one.
pub const DEFAULT_FORMAT: &str = "detail";

/// How a value can be shown as HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HtmlSource {
    /// Ready-made markup, returned as is.
    Markup(String),
    /// A named template rendered with the value bound as `item`.
    Template(Cow<'static, str>),
    /// Template path `{base}/{format}.html`, where `format` comes from the
    /// `format` query parameter or falls back to `default_format`. Only used
    /// when such a template exists.
    Derived {
        base: Cow<'static, str>,
        default_format: Cow<'static, str>,
    },
    /// No HTML representation.
    #[default]
    Unavailable,
}

impl HtmlSource {
    #[must_use]
    pub fn template(path: &'static str) -> Self {
        Self::Template(Cow::Borrowed(path))
    }

    /// Derive the template directory from a type name, e.g.
    /// `DeviceReport` → `device-report/{format}.html`.
    #[must_use]
    pub fn derived<T: ?Sized>() -> Self {
        Self::Derived {
            base: Cow::Owned(kebab_case(std::any::type_name::<T>())),
            default_format: Cow::Borrowed(DEFAULT_FORMAT),
        }
    }

    /// Use an explicit directory instead of the type name.
    #[must_use]
    pub fn plural(base: &'static str) -> Self {
        Self::Derived {
            base: Cow::Borrowed(base),
            default_format: Cow::Borrowed(DEFAULT_FORMAT),
        }
    }

    /// Replace the fallback format of a [`Derived`](Self::Derived) source.
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_default_format(self, format: &'static str) -> Self {
        match self {
            Self::Derived { base, .. } => Self::Derived {
                base,
                default_format: Cow::Borrowed(format),
            },
            other => other,
        }
    }
}

/// A value that knows its HTML representation.
pub trait Renderable: Serialize {
    fn html_source(&self) -> HtmlSource;

    /// Heading shown by list and detail pages.
    fn title(&self) -> Option<&str> {
        None
    }

    /// URL prefix under which the items of a collection payload live; list
    /// pages link each row to `{item_base}/{id}`.
    fn item_base(&self) -> Option<&str> {
        None
    }
}

/// What [`decide`] picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Raw,
    Markup(String),
    Template(String),
}

/// Whether an `Accept` header value asks for HTML.
#[must_use]
pub fn accepts_html(accept: &str) -> bool {
    HTML_MEDIA_TYPES
        .iter()
        .any(|media_type| accept.contains(media_type))
}

/// Choose between the raw value and an HTML representation.
///
/// `exists` is only consulted for [`HtmlSource::Derived`].
pub fn decide(
    accept: Option<&str>,
    format: Option<&str>,
    source: HtmlSource,
    exists: impl FnOnce(&str) -> bool,
) -> Outcome {
    let Some(accept) = accept else {
        tracing::debug!("no Accept header");
        return Outcome::Raw;
    };
    tracing::debug!(accept, "negotiating response");
    if !accepts_html(accept) {
        tracing::debug!("no HTML media type accepted");
        return Outcome::Raw;
    }

    match source {
        HtmlSource::Markup(markup) => {
            tracing::debug!("returning markup");
            Outcome::Markup(markup)
        }
        HtmlSource::Template(path) => {
            tracing::debug!(template = %path, "rendering template");
            Outcome::Template(path.into_owned())
        }
        HtmlSource::Derived {
            base,
            default_format,
        } => {
            let format = format
                .filter(|format| !format.is_empty())
                .unwrap_or(default_format.as_ref());
            let path = format!("{base}/{format}.html");
            if exists(&path) {
                tracing::debug!(template = %path, "rendering derived template");
                Outcome::Template(path)
            } else {
                tracing::debug!(template = %path, "derived template missing");
                Outcome::Raw
            }
        }
        HtmlSource::Unavailable => {
            tracing::debug!("no HTML representation");
            Outcome::Raw
        }
    }
}

/// Lowercase-hyphenated form of the last path segment of a type name,
/// without generic arguments.
#[must_use]
pub fn kebab_case(type_name: &str) -> String {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    let short = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics);

    let mut out = String::with_capacity(short.len() + 4);
    for (index, ch) in short.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

/// Request context needed to negotiate a response.
///
/// Extracted from the `Accept` header, the `format` query parameter and the
/// [`Templates`] held in application state.
pub struct Negotiate {
    accept: Option<String>,
    format: Option<String>,
    templates: Templates,
}

impl<S> FromRequestParts<S> for Negotiate
where
    Templates: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let format = parts.uri.query().and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "format")
                .map(|(_, value)| value.into_owned())
        });

        Ok(Self {
            accept,
            format,
            templates: Templates::from_ref(state),
        })
    }
}

impl Negotiate {
    pub fn new(accept: Option<&str>, format: Option<&str>, templates: Templates) -> Self {
        Self {
            accept: accept.map(str::to_owned),
            format: format.map(str::to_owned),
            templates,
        }
    }

    /// Answer `200 OK` with `value` in the negotiated representation.
    pub fn ok<T: Renderable>(&self, value: &T) -> Response {
        self.respond(StatusCode::OK, value)
    }

    /// Answer with `status` and `value` in the negotiated representation.
    pub fn respond<T: Renderable>(&self, status: StatusCode, value: &T) -> Response {
        let outcome = decide(
            self.accept.as_deref(),
            self.format.as_deref(),
            value.html_source(),
            |name| self.templates.exists(name),
        );

        match outcome {
            Outcome::Raw => (status, Json(value)).into_response(),
            Outcome::Markup(markup) => (status, Html(markup)).into_response(),
            Outcome::Template(name) => match self.templates.render(&name, value) {
                Ok(html) => (status, Html(html)).into_response(),
                Err(err) => {
                    tracing::error!(template = %name, error = %err, "template rendering failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ApiResponse::<()>::empty().with_message("internal server error")),
                    )
                        .into_response()
                }
            },
        }
    }
}
