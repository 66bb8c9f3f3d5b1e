//! Runtime settings read from the environment (after `.env` has been loaded).

use std::net::SocketAddr;

use crate::errors::{Error, Result};

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Address the HTTP server listens on, from `BIND_ADDRESS`.
pub fn bind_address() -> Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    raw.parse().map_err(|e| Error::Config {
        message: format!("Invalid BIND_ADDRESS '{raw}': {e}"),
    })
}

/// Path of the subdivision TOML file, from `SUBDIVISION_CONFIG`.
#[must_use]
pub fn config_path() -> String {
    std::env::var("SUBDIVISION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
