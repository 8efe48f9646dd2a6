//! Device handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use assetdesk_domain::device::{Device, NewDevice};
use assetdesk_domain::id::DeviceId;

use super::parse_id;
use crate::error::ApiError;
use crate::extract::Paging;
use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link, PagedApiResponse};
use crate::state::{AppState, Backend};

const LIST_TEMPLATE: &str = "page/list.html";
const DETAIL_TEMPLATE: &str = "page/detail.html";

fn collection_link() -> Link {
    Link::new("/devices", "Devices List")
}

/// Links shown next to a single device.
fn device_response(device: Device) -> ApiResponse<Device> {
    let url = format!("/devices/{}", device.id);
    let label = format!("{} - {}", device.id, device.name);
    ApiResponse::new(device)
        .with_link("Devices", collection_link())
        .with_link("Self", Link::new(url.clone(), label.clone()))
        .with_link(
            "Edit",
            Link::new(url.clone(), "Edit Device")
                .with_method("PUT")
                .with_render_hint(),
        )
        .with_link("Issues", Link::new(format!("{url}/issues"), "Device Issues"))
        .with_title(label)
        .with_html(HtmlSource::template(DETAIL_TEMPLATE))
}

/// `GET /devices`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Paging(page): Paging,
) -> Result<Response, ApiError> {
    let devices = state.device_service.list_devices(page).await?;
    let response = PagedApiResponse::new(devices, page, "Devices", collection_link())
        .with_link(
            "Add",
            Link::new("/devices", "Add Device")
                .with_method("POST")
                .with_render_hint(),
        )
        .with_title("Device List")
        .with_item_base("/devices")
        .with_html(HtmlSource::template(LIST_TEMPLATE));
    Ok(negotiate.ok(&response))
}

/// `POST /devices`
pub async fn create<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Json(body): Json<NewDevice>,
) -> Result<Response, ApiError> {
    let device = state.device_service.create_device(body).await?;
    let response = device_response(device).with_message("Device created successfully");
    Ok(negotiate.respond(StatusCode::CREATED, &response))
}

/// `GET /devices/{id}`
pub async fn get<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: DeviceId = parse_id(&id)?;
    let device = state.device_service.get_device(id).await?;
    Ok(negotiate.ok(&device_response(device)))
}

/// `PUT /devices/{id}`
pub async fn update<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
    Json(body): Json<NewDevice>,
) -> Result<Response, ApiError> {
    let id: DeviceId = parse_id(&id)?;
    let device = state.device_service.update_device(id, body).await?;
    let response = device_response(device).with_message("Device Updated");
    Ok(negotiate.ok(&response))
}

/// `DELETE /devices/{id}`
pub async fn delete<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: DeviceId = parse_id(&id)?;
    state.device_service.delete_device(id).await?;
    let response = ApiResponse::new(id.get())
        .with_message("Device Deleted")
        .with_link("Devices", collection_link())
        .with_html(HtmlSource::template(DETAIL_TEMPLATE));
    Ok(negotiate.ok(&response))
}

/// `GET /devices/{id}/issues`
pub async fn issues<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
    Paging(page): Paging,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: DeviceId = parse_id(&id)?;
    let issues = state.issue_service.issues_for_device(id, page).await?;
    let url = format!("/devices/{id}/issues");
    let response = PagedApiResponse::new(
        issues,
        page,
        "Device Issues",
        Link::new(url, "Device Issues"),
    )
    .with_link("Device", Link::new(format!("/devices/{id}"), "Device"))
    .with_title("Device Issues")
    .with_item_base("/issues")
    .with_html(HtmlSource::template(LIST_TEMPLATE));
    Ok(negotiate.ok(&response))
}
