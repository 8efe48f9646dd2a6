//! User handlers.
//!
//! Users are created by signing in, so there is no `POST /users`.

use axum::extract::{Path, State};
use axum::response::Response;

use assetdesk_domain::id::{GroupId, UserId};
use assetdesk_domain::user::User;

use super::parse_id;
use crate::error::ApiError;
use crate::extract::Paging;
use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link, PagedApiResponse};
use crate::state::{AppState, Backend};

fn collection_link() -> Link {
    Link::new("/users", "Users List")
}

/// A user with its navigation links, shown through `users/{format}.html`.
pub(crate) fn user_response(user: User) -> ApiResponse<User> {
    let url = format!("/users/{}", user.id);
    let picture = user.picture.clone();
    let title = user.name.clone();
    let mut response = ApiResponse::new(user)
        .with_link("Users", collection_link())
        .with_link("Self", Link::new(url.clone(), title.clone()))
        .with_link("Groups", Link::new(format!("{url}/groups"), "User Groups"))
        .with_title(title)
        .with_html(HtmlSource::plural("users"));
    if !picture.is_empty() {
        response = response.with_link("ProfileImage", Link::new(picture, "Profile Image"));
    }
    response
}

/// `GET /users`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Paging(page): Paging,
) -> Result<Response, ApiError> {
    let users = state.user_service.list_users(page).await?;
    let response = PagedApiResponse::new(users, page, "Users", collection_link())
        .with_title("User List")
        .with_item_base("/users")
        .with_html(HtmlSource::plural("users").with_default_format("list"));
    Ok(negotiate.ok(&response))
}

/// `GET /users/{id}`
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(negotiate.ok(&user_response(user)))
}

/// `DELETE /users/{id}`
pub async fn delete<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.user_service.delete_user(id.clone()).await?;
    let response = ApiResponse::new(id)
        .with_message("User Deleted")
        .with_link("Users", collection_link())
        .with_html(HtmlSource::template("page/detail.html"));
    Ok(negotiate.ok(&response))
}

/// `GET /users/{id}/groups`
pub async fn groups<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: UserId = parse_id(&id)?;
    let groups = state.user_service.groups_of(id.clone()).await?;
    let response = ApiResponse::new(groups)
        .with_link(
            "Self",
            Link::new(format!("/users/{id}/groups"), "User Groups"),
        )
        .with_link("User", Link::new(format!("/users/{id}"), "View User"))
        .with_title("User Groups")
        .with_item_base("/groups")
        .with_html(HtmlSource::plural("groups").with_default_format("list"));
    Ok(negotiate.ok(&response))
}

/// `PUT /users/{id}/groups/{group_id}`
pub async fn join_group<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path((id, group_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let id: UserId = parse_id(&id)?;
    let group_id: GroupId = parse_id(&group_id)?;
    let group = state
        .user_service
        .add_user_to_group(id.clone(), group_id)
        .await?;
    let response = ApiResponse::new(group)
        .with_message("User added to group")
        .with_link(
            "Groups",
            Link::new(format!("/users/{id}/groups"), "User Groups"),
        )
        .with_link("User", Link::new(format!("/users/{id}"), "View User"))
        .with_html(HtmlSource::plural("groups"));
    Ok(negotiate.ok(&response))
}
