use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Process configuration, built once at startup and shared with the handlers.
///
/// | Variable | Default |
/// |----------|---------|
/// | CLASSIFIER_API_URL | http://localhost:5000 |
/// | API_BASE_URL | http://127.0.0.1:8080 |
/// | PING_MESSAGE | ping |
/// | BIND_ADDR | 127.0.0.1 |
/// | HTTP_PORT | 8080 |
/// | LOG_LEVEL | info |
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the classification service
    pub classifier_url: String,
    /// Browser-facing API base URL, used by the presentation client
    pub api_base_url: String,
    pub ping_message: String,
    pub bind_addr: IpAddr,
    pub http_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing or unparseable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            classifier_url: trim_base(
                lookup("CLASSIFIER_API_URL").unwrap_or_else(|| "http://localhost:5000".into()),
            ),
            api_base_url: trim_base(
                lookup("API_BASE_URL").unwrap_or_else(|| "http://127.0.0.1:8080".into()),
            ),
            ping_message: lookup("PING_MESSAGE").unwrap_or_else(|| "ping".into()),
            bind_addr: lookup("BIND_ADDR")
                .and_then(|v| v.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            http_port: lookup("HTTP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
