//! Starship domain model and repository contract.

use async_trait::async_trait;

use crate::Result;

mod model;
pub use model::*;

#[async_trait]
pub trait StarshipRepositoryTrait: Send + Sync {
    fn list_starships(&self) -> Result<Vec<StarshipDetails>>;
    fn get_starship(&self, starship_id: &str) -> Result<StarshipDetails>;
    async fn create_starship(&self, new_starship: NewStarship) -> Result<StarshipDetails>;
    async fn update_starship(
        &self,
        starship_id: &str,
        update: NewStarship,
    ) -> Result<StarshipDetails>;
    async fn delete_starship(&self, starship_id: &str) -> Result<usize>;
}
