//! Shared handles for the API layer.

use std::sync::Arc;

use holocron_core::characters::CharacterRepositoryTrait;
use holocron_core::films::FilmRepositoryTrait;
use holocron_core::planets::PlanetRepositoryTrait;
use holocron_core::species::SpeciesRepositoryTrait;
use holocron_core::starships::StarshipRepositoryTrait;
use holocron_core::sync::SyncService;
use holocron_core::vehicles::VehicleRepositoryTrait;

#[derive(Clone)]
pub struct AppState {
    pub planets: Arc<dyn PlanetRepositoryTrait>,
    pub species: Arc<dyn SpeciesRepositoryTrait>,
    pub characters: Arc<dyn CharacterRepositoryTrait>,
    pub vehicles: Arc<dyn VehicleRepositoryTrait>,
    pub starships: Arc<dyn StarshipRepositoryTrait>,
    pub films: Arc<dyn FilmRepositoryTrait>,
    pub sync: Arc<SyncService>,
    pub api_token: String,
}
