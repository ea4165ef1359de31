//! Holocron server binary: wires the SQLite store, the upstream catalog
//! client, and the REST API together.

mod api;
mod auth;
mod config;
mod error;
mod state;

use std::sync::Arc;

use tracing::{error, info};

use holocron_core::sync::SyncService;
use holocron_core::{Error, Result};
use holocron_storage_sqlite::characters::CharacterRepository;
use holocron_storage_sqlite::films::FilmRepository;
use holocron_storage_sqlite::planets::PlanetRepository;
use holocron_storage_sqlite::species::SpeciesRepository;
use holocron_storage_sqlite::starships::StarshipRepository;
use holocron_storage_sqlite::sync::SyncRepository;
use holocron_storage_sqlite::vehicles::VehicleRepository;
use holocron_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};
use holocron_swapi::SwapiClient;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(message) => {
            error!("configuration error: {message}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        error!("server failed: {err}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<()> {
    let db_path = init(&config.db_dir)?;
    run_migrations(&db_path)?;
    let pool = create_pool(&db_path)?;
    let writer = spawn_writer(pool.as_ref().clone());

    let source = Arc::new(SwapiClient::new(config.swapi.clone()));
    let sync = Arc::new(SyncService::new(
        source,
        Arc::new(SyncRepository::new(writer.clone())),
    ));

    let state = AppState {
        planets: Arc::new(PlanetRepository::new(pool.clone(), writer.clone())),
        species: Arc::new(SpeciesRepository::new(pool.clone(), writer.clone())),
        characters: Arc::new(CharacterRepository::new(pool.clone(), writer.clone())),
        vehicles: Arc::new(VehicleRepository::new(pool.clone(), writer.clone())),
        starships: Arc::new(StarshipRepository::new(pool.clone(), writer.clone())),
        films: Arc::new(FilmRepository::new(pool, writer)),
        sync,
        api_token: config.api_token.clone(),
    };

    let app = api::api_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| Error::Unexpected(format!("Failed to bind {}: {e}", config.bind_addr)))?;
    info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Unexpected(e.to_string()))
}
