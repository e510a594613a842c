use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Wi-Fi credentials and site name stored on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParameters {
    /// Access point name
    pub ssid: String,
    /// Access point password
    pub password: String,
    /// Site the device belongs to
    pub site: String,
}

impl ConnectionParameters {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>, site: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
            site: site.into(),
        }
    }
}
