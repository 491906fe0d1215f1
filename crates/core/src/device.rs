//! Addressing data for the device a request targets.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::RequestError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DeviceData {
    /// IPv4 or IPv6 address of the device.
    #[validate(ip(message = "device address must be a valid IP address"))]
    pub ip_address: String,
}

impl DeviceData {
    pub fn new(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
        }
    }

    /// Shape checks run before any connection is attempted.
    pub fn check(&self) -> Result<(), RequestError> {
        if self.ip_address.trim().is_empty() {
            return Err(RequestError::Validation(
                "device address is missing".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| RequestError::Validation(e.to_string()))
    }
}
