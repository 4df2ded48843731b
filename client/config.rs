// Client configuration read from environment variables
//
// RTBUF_HOST: buffer server host (default: 127.0.0.1)
// RTBUF_PORT: buffer server TCP port (default: 1972)
// RTBUF_TIMEOUT_MS: socket read/write timeout, 0 or unset blocks forever
use crate::error::{ClientError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 1972;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(host) = lookup("RTBUF_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("RTBUF_PORT") {
            config.port = parse_var("RTBUF_PORT", port)?;
        }
        if let Some(ms) = lookup("RTBUF_TIMEOUT_MS") {
            let ms: u64 = parse_var("RTBUF_TIMEOUT_MS", ms)?;
            config.timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ClientError::Config { var, value })
}
