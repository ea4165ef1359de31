//! Environment-driven server configuration.

use std::time::Duration;

use holocron_swapi::{SwapiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// The one explicit configuration value set of the service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_dir: String,
    /// The bearer token every API caller must present.
    pub api_token: String,
    pub swapi: SwapiConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_token = std::env::var("HOLOCRON_API_TOKEN")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| "HOLOCRON_API_TOKEN must be set".to_string())?;

        let timeout_secs = std::env::var("SWAPI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            bind_addr: env_or("HOLOCRON_BIND", "127.0.0.1:8080"),
            db_dir: env_or("HOLOCRON_DB_DIR", "./data"),
            api_token,
            swapi: SwapiConfig {
                base_url: env_or("SWAPI_BASE_URL", DEFAULT_BASE_URL),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
