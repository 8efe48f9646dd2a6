//! Google sign-in handlers.
//!
//! The provider's tokens are kept in `HttpOnly; SameSite=Strict` cookies;
//! there is no server-side session.

use axum::extract::{Query, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use serde::Deserialize;

use assetdesk_domain::user::User;

use super::users::user_response;
use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link};
use crate::state::{AppState, Backend};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Query string of the provider redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
}

fn me_link() -> Link {
    Link::new("/auth/google/me", "Current User")
}

fn login_link() -> Link {
    Link::new("/auth/login", "Sign in with Google")
}

/// `Set-Cookie` value for `name`, percent-encoded. `max_age` of `Some(0)`
/// expires the cookie.
fn cookie(name: &str, value: &str, max_age: Option<u64>) -> Option<HeaderValue> {
    let mut builder = Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/");
    if let Some(age) = max_age {
        builder = builder.max_age(Duration::seconds(i64::try_from(age).unwrap_or(i64::MAX)));
    }
    let cookie = builder.build();
    match HeaderValue::from_str(&cookie.encoded().to_string()) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(cookie = name, error = %err, "token is not a valid cookie value");
            None
        }
    }
}

/// Decoded value of cookie `name` in the request's `Cookie` headers, with
/// surrounding quotes removed.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse_encoded)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value_trimmed().to_owned())
}

/// `GET /auth/login`
pub async fn login<B: Backend>(State(state): State<AppState<B>>) -> Redirect {
    Redirect::temporary(&state.auth_service.login_url())
}

/// `GET /auth/google?code=…`
///
/// Login failures are answered with `200` and the failure as the message.
pub async fn google_callback<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Query(params): Query<CallbackParams>,
) -> Response {
    let login = match state.auth_service.complete_login(&params.code).await {
        Ok(login) => login,
        Err(err) => {
            tracing::warn!(error = %err, "google login failed");
            let response = ApiResponse::<()>::empty()
                .with_message(err.to_string())
                .with_link("Login", login_link())
                .with_html(HtmlSource::template("page/detail.html"));
            return negotiate.ok(&response);
        }
    };

    let mut cookies = Vec::with_capacity(2);
    cookies.extend(cookie(
        ACCESS_TOKEN_COOKIE,
        &login.tokens.access_token,
        login.tokens.expires_in,
    ));
    if let Some(refresh_token) = &login.tokens.refresh_token {
        cookies.extend(cookie(REFRESH_TOKEN_COOKIE, refresh_token, None));
    }

    let response = ApiResponse::<()>::empty()
        .with_message("Successfully authenticated with Google")
        .with_link("Me", me_link())
        .with_link(
            "User",
            Link::new(format!("/users/{}", login.user.id), login.user.name.clone()),
        )
        .with_html(HtmlSource::template("page/detail.html"));
    let headers = cookies.into_iter().map(|value| (header::SET_COOKIE, value));
    (AppendHeaders(headers), negotiate.ok(&response)).into_response()
}

/// `GET /auth/google/me`
///
/// Answers `response: null` when the browser is not signed in or the
/// provider no longer accepts its token.
pub async fn me<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    headers: HeaderMap,
) -> Response {
    let Some(token) = cookie_value(&headers, ACCESS_TOKEN_COOKIE) else {
        return negotiate.ok(&signed_out("Not signed in"));
    };
    match state.auth_service.current_user(&token).await {
        Ok(user) => negotiate.ok(&user_response(user).with_link("Me", me_link())),
        Err(err) => {
            tracing::info!(error = %err, "access token rejected");
            negotiate.ok(&signed_out("Failed to get user info"))
        }
    }
}

fn signed_out(message: &str) -> ApiResponse<User> {
    ApiResponse::empty()
        .with_message(message)
        .with_link("Login", login_link())
        .with_html(HtmlSource::plural("users"))
}

/// `GET /auth/logout`
pub async fn logout(negotiate: Negotiate) -> Response {
    let cookies = [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE]
        .into_iter()
        .filter_map(|name| cookie(name, "", Some(0)))
        .map(|value| (header::SET_COOKIE, value));
    let response = ApiResponse::<()>::empty()
        .with_message("Signed out")
        .with_link("Home", Link::new("/", "Home"))
        .with_link("Login", login_link())
        .with_html(HtmlSource::template("page/detail.html"));
    (AppendHeaders(cookies), negotiate.ok(&response)).into_response()
}
