//! Group handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use assetdesk_domain::group::{Group, NewGroup};
use assetdesk_domain::id::GroupId;

use super::parse_id;
use crate::error::ApiError;
use crate::extract::Paging;
use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link, PagedApiResponse};
use crate::state::{AppState, Backend};

fn collection_link() -> Link {
    Link::new("/groups", "Groups List")
}

fn group_response(group: Group) -> ApiResponse<Group> {
    let url = format!("/groups/{}", group.id);
    let title = group.name.clone();
    ApiResponse::new(group)
        .with_link("Groups", collection_link())
        .with_link("Self", Link::new(url, title.clone()))
        .with_title(title)
        .with_html(HtmlSource::plural("groups"))
}

/// `GET /groups`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Paging(page): Paging,
) -> Result<Response, ApiError> {
    let groups = state.user_service.list_groups(page).await?;
    let response = PagedApiResponse::new(groups, page, "Groups", collection_link())
        .with_link(
            "Add",
            Link::new("/groups", "Add Group")
                .with_method("POST")
                .with_render_hint(),
        )
        .with_title("Group List")
        .with_item_base("/groups")
        .with_html(HtmlSource::plural("groups").with_default_format("list"));
    Ok(negotiate.ok(&response))
}

/// `POST /groups`
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Json(body): Json<NewGroup>,
) -> Result<Response, ApiError> {
    let group = state.user_service.create_group(body).await?;
    let response = group_response(group).with_message("Group created successfully");
    Ok(negotiate.respond(StatusCode::CREATED, &response))
}

/// `GET /groups/{id}`
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: GroupId = parse_id(&id)?;
    let group = state.user_service.get_group(id).await?;
    Ok(negotiate.ok(&group_response(group)))
}
