//! Planet domain model and repository contract.

use async_trait::async_trait;

use crate::Result;

mod model;
pub use model::*;

#[async_trait]
pub trait PlanetRepositoryTrait: Send + Sync {
    fn list_planets(&self) -> Result<Vec<Planet>>;
    fn get_planet(&self, planet_id: &str) -> Result<Planet>;
    async fn create_planet(&self, new_planet: NewPlanet) -> Result<Planet>;
    async fn update_planet(&self, planet_id: &str, update: NewPlanet) -> Result<Planet>;
    async fn delete_planet(&self, planet_id: &str) -> Result<usize>;
}
