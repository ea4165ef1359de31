use async_trait::async_trait;

use holocron_core::sync::{CatalogSnapshot, SyncRepositoryTrait, SyncSummary};
use holocron_core::Result;

use crate::db::WriteHandle;

use super::upsert::{
    import_characters, import_films, import_planets, import_species, import_starships,
    import_vehicles,
};

/// Applies a full catalog snapshot as one writer job.
///
/// The writer actor wraps the job in a single immediate transaction, so the
/// six stages commit together or not at all; a failure in any stage leaves
/// the store exactly as it was before the run.
pub struct SyncRepository {
    writer: WriteHandle,
}

impl SyncRepository {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl SyncRepositoryTrait for SyncRepository {
    async fn replace_catalog(&self, snapshot: CatalogSnapshot) -> Result<SyncSummary> {
        self.writer
            .exec(move |conn| {
                let planet_map = import_planets(conn, &snapshot.planets)?;
                let species_map = import_species(conn, &snapshot.species, &planet_map)?;
                let character_map =
                    import_characters(conn, &snapshot.characters, &planet_map, &species_map)?;
                let vehicle_map = import_vehicles(conn, &snapshot.vehicles, &character_map)?;
                let starship_map = import_starships(conn, &snapshot.starships, &character_map)?;
                let films = import_films(
                    conn,
                    &snapshot.films,
                    &character_map,
                    &planet_map,
                    &species_map,
                    &vehicle_map,
                    &starship_map,
                )?;

                Ok(SyncSummary {
                    planets: planet_map.len(),
                    species: species_map.len(),
                    characters: character_map.len(),
                    vehicles: vehicle_map.len(),
                    starships: starship_map.len(),
                    films,
                })
            })
            .await
    }
}
