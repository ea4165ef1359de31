//! HTTP client for the upstream SWAPI catalog.

mod client;

pub use client::{SwapiClient, SwapiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
