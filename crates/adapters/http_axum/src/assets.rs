//! Static assets and the device types derived from them.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use assetdesk_app::ports::DeviceTypeCatalog;
use assetdesk_domain::error::AssetDeskError;

/// Asset directory shipped with this crate.
pub const BUNDLED_ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Sub-directory of the assets holding one SVG icon per device type.
const ICON_DIR: &str = "svgrepo";

/// Device types are the stems of the `*.svg` files under `svgrepo/`.
pub struct DirectoryDeviceTypeCatalog {
    icons: PathBuf,
}

impl DirectoryDeviceTypeCatalog {
    /// Catalog over `<assets_dir>/svgrepo`.
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons: assets_dir.into().join(ICON_DIR),
        }
    }
}

impl DeviceTypeCatalog for DirectoryDeviceTypeCatalog {
    fn device_types(&self) -> impl Future<Output = Result<Vec<String>, AssetDeskError>> + Send {
        let icons = self.icons.clone();
        async move {
            let mut entries = match tokio::fs::read_dir(&icons).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!(path = %icons.display(), "device type icon directory missing");
                    return Ok(Vec::new());
                }
                Err(err) => return Err(AssetDeskError::Storage(Box::new(err))),
            };

            let mut names = Vec::new();
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|err| AssetDeskError::Storage(Box::new(err)))?
            {
                let path = entry.path();
                let is_svg = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
                if let (true, Some(stem)) = (is_svg, path.file_stem().and_then(|s| s.to_str())) {
                    names.push(stem.to_string());
                }
            }
            names.sort();
            Ok(names)
        }
    }
}
