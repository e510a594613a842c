use serde::{Deserialize, Serialize};

/// Chooses the websocket endpoint from the host the UI was served by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionTarget {
    /// Host names that mean "served from this machine"
    pub local_hosts: Vec<String>,
    pub local_endpoint: String,
    pub scheme: String,
}

impl Default for ConnectionTarget {
    fn default() -> Self {
        Self {
            local_hosts: vec!["localhost".into(), "127.0.0.1".into(), "fs".into()],
            local_endpoint: "ws://localhost:8080".into(),
            scheme: "ws".into(),
        }
    }
}

impl ConnectionTarget {
    /// `page_host` is `host[:port]`; the port is kept for remote hosts.
    pub fn resolve(&self, page_host: &str) -> String {
        let hostname = hostname(page_host);

        if self
            .local_hosts
            .iter()
            .any(|local| local.eq_ignore_ascii_case(hostname))
        {
            self.local_endpoint.clone()
        } else {
            format!("{}://{}", self.scheme, page_host)
        }
    }
}

fn hostname(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or(host)
}
