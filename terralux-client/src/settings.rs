use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::target::ConnectionTarget;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monitor {
    /// `host[:port]` the UI would have been served from
    pub page_host: String,
    pub retry_limit: u32,
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub target: ConnectionTarget,
}

impl Monitor {
    pub fn endpoint(&self) -> String {
        self.target.resolve(&self.page_host)
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            page_host: "localhost".into(),
            retry_limit: crate::controller::RETRY_LIMIT,
            poll_interval_ms: 1000,
            target: ConnectionTarget::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub monitor: Monitor,
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

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn test_monitor_section_defaults_target() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                [logger]
                level = "debug"

                [monitor]
                page_host = "terrarium.lan:81"
                retry_limit = 5
                poll_interval_ms = 1000
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.monitor.target, ConnectionTarget::default());
        assert_eq!(settings.monitor.endpoint(), "ws://terrarium.lan:81");
    }

    #[test]
    fn test_default_monitor_uses_local_endpoint() {
        assert_eq!(Monitor::default().endpoint(), "ws://localhost:8080");
    }
}
