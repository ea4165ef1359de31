//! Character domain model and repository contract.

use async_trait::async_trait;

use crate::Result;

mod model;
pub use model::*;

#[async_trait]
pub trait CharacterRepositoryTrait: Send + Sync {
    fn list_characters(&self) -> Result<Vec<CharacterDetails>>;
    fn get_character(&self, character_id: &str) -> Result<CharacterDetails>;
    async fn create_character(&self, new_character: NewCharacter) -> Result<CharacterDetails>;
    async fn update_character(
        &self,
        character_id: &str,
        update: NewCharacter,
    ) -> Result<CharacterDetails>;
    async fn delete_character(&self, character_id: &str) -> Result<usize>;
}
