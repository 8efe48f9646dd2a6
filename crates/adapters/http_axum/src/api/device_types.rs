//! Device type listing.

use axum::extract::State;
use axum::response::Response;

use assetdesk_app::ports::DeviceTypeCatalog;

use crate::error::ApiError;
use crate::negotiate::{HtmlSource, Negotiate};
use crate::response::{ApiResponse, Link};
use crate::state::{AppState, Backend};

/// `GET /device-types`
pub async fn list<B: Backend>(
    State(state): State<AppState<B>>,
    negotiate: Negotiate,
) -> Result<Response, ApiError> {
    let types = state.device_types.device_types().await?;
    let response = ApiResponse::new(types)
        .with_link("Self", Link::new("/device-types", "Device Types"))
        .with_link("Devices", Link::new("/devices", "Devices List"))
        .with_title("Device Types")
        .with_html(HtmlSource::template("page/list.html"));
    Ok(negotiate.ok(&response))
}
