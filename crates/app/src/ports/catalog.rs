//! Device type catalog port.

use std::future::Future;

use assetdesk_domain::error::AssetDeskError;

/// Source of the device type names a deployment knows how to display.
pub trait DeviceTypeCatalog {
    /// All known device type names, sorted.
    fn device_types(&self) -> impl Future<Output = Result<Vec<String>, AssetDeskError>> + Send;
}
