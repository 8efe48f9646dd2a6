//! Device: a tracked piece of hardware with a type and a location.

use serde::{Deserialize, Serialize};

use crate::error::{AssetDeskError, ValidationError};
use crate::id::DeviceId;

/// Payload describing a device that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDevice {
    pub name: String,
    /// Device type name; matches an icon under the `svgrepo/` assets.
    pub device_type: String,
    pub location: String,
}

impl NewDevice {
    /// Create a builder for constructing a [`NewDevice`].
    #[must_use]
    pub fn builder() -> NewDeviceBuilder {
        NewDeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] when `name` or `device_type`
    /// is blank.
    pub fn validate(&self) -> Result<(), AssetDeskError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.device_type.trim().is_empty() {
            return Err(ValidationError::EmptyDeviceType.into());
        }
        Ok(())
    }

    /// Attach a storage-assigned id.
    #[must_use]
    pub fn with_id(self, id: DeviceId) -> Device {
        Device {
            id,
            name: self.name,
            device_type: self.device_type,
            location: self.location,
        }
    }
}

/// A stored device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub device_type: String,
    pub location: String,
}

/// Step-by-step builder for [`NewDevice`].
#[derive(Debug, Default)]
pub struct NewDeviceBuilder {
    name: Option<String>,
    device_type: Option<String>,
    location: Option<String>,
}

impl NewDeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Consume the builder, validate, and return a [`NewDevice`].
    ///
    /// # Errors
    ///
    /// Returns [`AssetDeskError::Validation`] if `name` or `device_type` is
    /// missing or blank.
    pub fn build(self) -> Result<NewDevice, AssetDeskError> {
        let device = NewDevice {
            name: self.name.unwrap_or_default(),
            device_type: self.device_type.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        };
        device.validate()?;
        Ok(device)
    }
}
