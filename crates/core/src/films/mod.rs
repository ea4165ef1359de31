//! Film domain model and repository contract.

use async_trait::async_trait;

use crate::Result;

mod model;
pub use model::*;

#[async_trait]
pub trait FilmRepositoryTrait: Send + Sync {
    fn list_films(&self) -> Result<Vec<FilmDetails>>;
    fn get_film(&self, film_id: &str) -> Result<FilmDetails>;
    async fn create_film(&self, new_film: NewFilm) -> Result<FilmDetails>;
    async fn update_film(&self, film_id: &str, update: NewFilm) -> Result<FilmDetails>;
    async fn delete_film(&self, film_id: &str) -> Result<usize>;
}
