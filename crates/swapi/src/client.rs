//! Reqwest-based client for the upstream catalog endpoints.
//!
//! Each collection is served as one JSON array. Calls make a single attempt:
//! no retries, no caching. Transport failures, non-2xx statuses, and decode
//! failures all surface as [`SourceError`] and abort the calling sync run.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use holocron_core::errors::{Result, SourceError};
use holocron_core::sync::{
    CatalogSourceTrait, CharacterRecord, FilmRecord, PlanetRecord, SpeciesRecord, StarshipRecord,
    VehicleRecord,
};

/// Default upstream catalog base URL.
pub const DEFAULT_BASE_URL: &str = "https://swapi.info/api";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the upstream catalog client.
#[derive(Debug, Clone)]
pub struct SwapiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SwapiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for the upstream SWAPI catalog.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(config: SwapiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch one full collection snapshot.
    async fn fetch_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.collection_url(path);
        debug!("fetching catalog collection {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()).into());
        }

        let records = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;
        Ok(records)
    }
}

impl Default for SwapiClient {
    fn default() -> Self {
        Self::new(SwapiConfig::default())
    }
}

#[async_trait]
impl CatalogSourceTrait for SwapiClient {
    async fn fetch_planets(&self) -> Result<Vec<PlanetRecord>> {
        self.fetch_collection("planets").await
    }

    async fn fetch_species(&self) -> Result<Vec<SpeciesRecord>> {
        self.fetch_collection("species").await
    }

    async fn fetch_characters(&self) -> Result<Vec<CharacterRecord>> {
        self.fetch_collection("people").await
    }

    async fn fetch_vehicles(&self) -> Result<Vec<VehicleRecord>> {
        self.fetch_collection("vehicles").await
    }

    async fn fetch_starships(&self) -> Result<Vec<StarshipRecord>> {
        self.fetch_collection("starships").await
    }

    async fn fetch_films(&self) -> Result<Vec<FilmRecord>> {
        self.fetch_collection("films").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = SwapiConfig::default();
        assert_eq!(config.base_url, "https://swapi.info/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn collection_url_trims_trailing_slash() {
        let client = SwapiClient::new(SwapiConfig {
            base_url: "https://swapi.info/api/".to_string(),
            ..SwapiConfig::default()
        });
        assert_eq!(
            client.collection_url("people"),
            "https://swapi.info/api/people"
        );
    }
}
