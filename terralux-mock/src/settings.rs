use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use terralux_api::ConnectionParameters;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

/// Access point settings the simulated device reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub ssid: String,
    pub password: String,
    pub site: String,
}

impl From<Device> for ConnectionParameters {
    fn from(device: Device) -> Self {
        ConnectionParameters::new(device.ssid, device.password, device.site)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub device: Device,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("TERRALUX").separator("__"))
            .build()?
            .try_deserialize()
    }
}
