//! Server configuration sourced from the environment.

use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct Config {
    /// Bind address, derived from `PORT` (hosting platforms assign it).
    pub listen_addr: String,
    /// Directory holding the static front page (`TASAS_STATIC_DIR`).
    pub static_dir: String,
    /// Timeout applied to each outbound fetch (`TASAS_HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let static_dir =
            std::env::var("TASAS_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
        let http_timeout = std::env::var("TASAS_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));

        Self {
            listen_addr: format!("0.0.0.0:{port}"),
            static_dir,
            http_timeout,
        }
    }
}
