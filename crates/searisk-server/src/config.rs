//! Server configuration from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use searisk_core::RerouteConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub hazards_file: PathBuf,
    /// Sea-router base URL; `None` selects the offline direct-line generator
    pub router_url: Option<String>,
    pub router_timeout: Duration,
    pub reroute: RerouteConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = RerouteConfig::default();
        Self {
            server_port: env::var("SEARISK_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            hazards_file: env::var("SEARISK_HAZARDS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/hazardous_zones.json")),
            router_url: env::var("SEARISK_ROUTER_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            router_timeout: Duration::from_secs(
                env::var("SEARISK_ROUTER_TIMEOUT_S")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            reroute: RerouteConfig {
                max_attempts: env::var("SEARISK_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.max_attempts),
                ..defaults
            },
        }
    }
}
