//! Species domain model and repository contract.

use async_trait::async_trait;

use crate::Result;

mod model;
pub use model::*;

#[async_trait]
pub trait SpeciesRepositoryTrait: Send + Sync {
    fn list_species(&self) -> Result<Vec<SpeciesDetails>>;
    fn get_species(&self, species_id: &str) -> Result<SpeciesDetails>;
    async fn create_species(&self, new_species: NewSpecies) -> Result<SpeciesDetails>;
    async fn update_species(&self, species_id: &str, update: NewSpecies) -> Result<SpeciesDetails>;
    async fn delete_species(&self, species_id: &str) -> Result<usize>;
}
