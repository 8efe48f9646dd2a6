//! Issue handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use assetdesk_domain::id::{DeviceId, IssueId};
use assetdesk_domain::issue::{Issue, NewIssue};

use super::parse_id;
use crate::error::ApiError;
use crate::extract::Paging;
use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link, PagedApiResponse};
use crate::state::{AppState, Backend};

const LIST_TEMPLATE: &str = "page/list.html";
const DETAIL_TEMPLATE: &str = "page/detail.html";

/// Body of a successful `PUT /issues/{id}/devices/{device_id}`.
#[derive(Debug, Serialize)]
pub struct Relation {
    pub issue_id: IssueId,
    pub device_id: DeviceId,
}

fn collection_link() -> Link {
    Link::new("/issues", "Issues List")
}

fn issue_response(issue: Issue) -> ApiResponse<Issue> {
    let url = format!("/issues/{}", issue.id);
    let title = format!("{} - {}", issue.id, issue.title);
    ApiResponse::new(issue)
        .with_link("Issues", collection_link())
        .with_link("Self", Link::new(url.clone(), "View Issue"))
        .with_link(
            "Edit",
            Link::new(url.clone(), "Edit Issue")
                .with_method("PUT")
                .with_render_hint(),
        )
        .with_link("Devices", Link::new(format!("{url}/devices"), "Related Devices"))
        .with_title(title)
        .with_html(HtmlSource::template(DETAIL_TEMPLATE))
}

/// `GET /issues`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Paging(page): Paging,
) -> Result<Response, ApiError> {
    let issues = state.issue_service.list_issues(page).await?;
    let response = PagedApiResponse::new(issues, page, "Issues", collection_link())
        .with_link(
            "Add",
            Link::new("/issues", "Report Issue")
                .with_method("POST")
                .with_render_hint(),
        )
        .with_message("List of Issues")
        .with_title("Issue List")
        .with_item_base("/issues")
        .with_html(HtmlSource::template(LIST_TEMPLATE));
    Ok(negotiate.ok(&response))
}

/// `POST /issues`
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Json(body): Json<NewIssue>,
) -> Result<Response, ApiError> {
    let issue = state.issue_service.create_issue(body).await?;
    let response = issue_response(issue).with_message("Issue created successfully");
    Ok(negotiate.respond(StatusCode::CREATED, &response))
}

/// `GET /issues/{id}`
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: IssueId = parse_id(&id)?;
    let issue = state.issue_service.get_issue(id).await?;
    let response = issue_response(issue).with_message("Issue Details");
    Ok(negotiate.ok(&response))
}

/// `PUT /issues/{id}`
pub async fn update<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
    Json(body): Json<NewIssue>,
) -> Result<Response, ApiError> {
    let id: IssueId = parse_id(&id)?;
    let issue = state.issue_service.update_issue(id, body).await?;
    let response = issue_response(issue).with_message("Issue Updated");
    Ok(negotiate.ok(&response))
}

/// `DELETE /issues/{id}`
pub async fn delete<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: IssueId = parse_id(&id)?;
    state.issue_service.delete_issue(id).await?;
    let response = ApiResponse::new(id.get())
        .with_message("Issue Deleted")
        .with_link("Issues", collection_link())
        .with_html(HtmlSource::template(DETAIL_TEMPLATE));
    Ok(negotiate.ok(&response))
}

/// `GET /issues/{id}/devices`
pub async fn devices<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: IssueId = parse_id(&id)?;
    let devices = state.issue_service.related_devices(id).await?;
    let response = ApiResponse::new(devices)
        .with_link(
            "Self",
            Link::new(format!("/issues/{id}/devices"), "Related Devices"),
        )
        .with_link("Issue", Link::new(format!("/issues/{id}"), "View Issue"))
        .with_title("Related Devices")
        .with_item_base("/devices")
        .with_html(HtmlSource::template(LIST_TEMPLATE));
    Ok(negotiate.ok(&response))
}

/// `PUT /issues/{id}/devices/{device_id}`
pub async fn relate_device<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path((id, device_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let issue_id: IssueId = parse_id(&id)?;
    let device_id: DeviceId = parse_id(&device_id)?;
    state
        .issue_service
        .relate_device(issue_id, device_id)
        .await?;
    let response = ApiResponse::new(Relation {
        issue_id,
        device_id,
    })
    .with_message("Device related to issue")
    .with_link(
        "Devices",
        Link::new(format!("/issues/{issue_id}/devices"), "Related Devices"),
    )
    .with_link("Issue", Link::new(format!("/issues/{issue_id}"), "View Issue"))
    .with_html(HtmlSource::template(DETAIL_TEMPLATE));
    Ok(negotiate.ok(&response))
}
