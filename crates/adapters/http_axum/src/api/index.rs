//! Landing page and the site menu.

use axum::response::Response;

use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link, Links};

/// Top-level navigation, shown on the index and in every page header.
#[must_use]
pub fn menu() -> Links {
    [
        ("Devices", Link::new("/devices", "Devices")),
        ("Issues", Link::new("/issues", "Issues")),
        ("Users", Link::new("/users", "Users")),
        ("Groups", Link::new("/groups", "Groups")),
        ("Device Types", Link::new("/device-types", "Device Types")),
        ("Login", Link::new("/auth/login", "Sign in with Google")),
    ]
    .into_iter()
    .collect()
}

/// `GET /`
pub async fn index(negotiate: Negotiate) -> Response {
    let mut response = ApiResponse::<()>::empty()
        .with_title("Asset Desk")
        .with_html(HtmlSource::template("index.html"));
    response.links = menu();
    negotiate.ok(&response)
}
