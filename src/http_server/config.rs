//! Listener address and CORS origins for the reservation HTTP server.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Where the server listens and which browser origins it answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host name or IP address to bind (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(), // booking web client dev server
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl HttpServerConfig {
    /// `host:port`, resolved by the listener when it binds
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse `cors_origins` into header values.
    ///
    /// Every entry must be a `http://` or `https://` origin without a path.
    /// The first bad entry is reported.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>, String> {
        self.cors_origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect()
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, String> {
    let invalid = || format!("invalid CORS origin '{}'", origin);

    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(invalid)?;
    if rest.is_empty() || rest.contains('/') {
        return Err(invalid());
    }

    HeaderValue::from_str(origin).map_err(|_| invalid())
}
