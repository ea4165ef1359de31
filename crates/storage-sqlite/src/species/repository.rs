use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use holocron_core::planets::Planet;
use holocron_core::species::{NewSpecies, Species, SpeciesDetails, SpeciesRepositoryTrait};
use holocron_core::{Error, Result};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::planets::PlanetDB;
use crate::schema::{planets, species};

use super::model::SpeciesDB;

/// Load species rows with their homeworld embedded. `ids` restricts the
/// result to those species; `None` loads the whole collection.
pub(crate) fn load_species_details(
    conn: &mut SqliteConnection,
    ids: Option<&[String]>,
) -> Result<Vec<SpeciesDetails>> {
    let rows: Vec<SpeciesDB> = match ids {
        Some(ids) => species::table
            .filter(species::id.eq_any(ids))
            .order(species::name.asc())
            .select(SpeciesDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
        None => species::table
            .order(species::name.asc())
            .select(SpeciesDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
    };

    let planet_ids: Vec<String> = rows.iter().filter_map(|row| row.planet_id.clone()).collect();
    let planets_by_id: HashMap<String, Planet> = planets::table
        .filter(planets::id.eq_any(&planet_ids))
        .select(PlanetDB::as_select())
        .load::<PlanetDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(|row| (row.id.clone(), Planet::from(row)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let planet = row
                .planet_id
                .as_ref()
                .and_then(|planet_id| planets_by_id.get(planet_id))
                .cloned();
            SpeciesDetails {
                species: Species::from(row),
                planet,
            }
        })
        .collect())
}

pub(crate) fn get_species_details(
    conn: &mut SqliteConnection,
    species_id: &str,
) -> Result<SpeciesDetails> {
    load_species_details(conn, Some(&[species_id.to_string()]))?
        .pop()
        .ok_or_else(|| Error::not_found("Species"))
}

pub struct SpeciesRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SpeciesRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SpeciesRepositoryTrait for SpeciesRepository {
    fn list_species(&self) -> Result<Vec<SpeciesDetails>> {
        let mut conn = get_connection(&self.pool)?;
        load_species_details(&mut conn, None)
    }

    fn get_species(&self, species_id: &str) -> Result<SpeciesDetails> {
        let mut conn = get_connection(&self.pool)?;
        get_species_details(&mut conn, species_id)
    }

    async fn create_species(&self, new_species: NewSpecies) -> Result<SpeciesDetails> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let row = SpeciesDB::from_new(
                    &new_species,
                    new_species.planet_id.clone(),
                    Uuid::new_v4().to_string(),
                    now,
                    now,
                );
                diesel::insert_into(species::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                get_species_details(conn, &row.id)
            })
            .await
    }

    async fn update_species(&self, species_id: &str, update: NewSpecies) -> Result<SpeciesDetails> {
        let species_id = species_id.to_string();
        self.writer
            .exec(move |conn| {
                let current = species::table
                    .find(&species_id)
                    .select(SpeciesDB::as_select())
                    .first::<SpeciesDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Species"))?;

                let row = SpeciesDB::from_new(
                    &update,
                    update.planet_id.clone(),
                    current.id.clone(),
                    current.created_at,
                    Utc::now().naive_utc(),
                );
                diesel::update(species::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                get_species_details(conn, &current.id)
            })
            .await
    }

    async fn delete_species(&self, species_id: &str) -> Result<usize> {
        let species_id = species_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(species::table.find(&species_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found("Species"));
                }
                Ok(affected)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterRepository;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use crate::planets::PlanetRepository;
    use holocron_core::characters::{CharacterRepositoryTrait, NewCharacter};
    use holocron_core::planets::{NewPlanet, PlanetRepositoryTrait};
    use tempfile::tempdir;

    fn setup() -> (PlanetRepository, SpeciesRepository, CharacterRepository) {
        let app_data = tempdir()
            .expect("tempdir")
            .keep()
            .to_string_lossy()
            .to_string();
        let db_path = init(&app_data).expect("init db");
        run_migrations(&db_path).expect("migrate db");
        let pool = create_pool(&db_path).expect("create pool");
        let writer = spawn_writer(pool.as_ref().clone());
        (
            PlanetRepository::new(pool.clone(), writer.clone()),
            SpeciesRepository::new(pool.clone(), writer.clone()),
            CharacterRepository::new(pool, writer),
        )
    }

    fn new_planet(name: &str) -> NewPlanet {
        NewPlanet {
            name: name.to_string(),
            rotation_period: "23".to_string(),
            orbital_period: "304".to_string(),
            diameter: "10465".to_string(),
            climate: "arid".to_string(),
            gravity: "1 standard".to_string(),
            terrain: "desert".to_string(),
            surface_water: "1".to_string(),
            population: "200000".to_string(),
        }
    }

    fn new_species(name: &str, planet_id: Option<String>) -> NewSpecies {
        NewSpecies {
            name: name.to_string(),
            classification: "mammal".to_string(),
            designation: "sentient".to_string(),
            average_height: "180".to_string(),
            average_lifespan: "120".to_string(),
            hair_colors: "black, brown".to_string(),
            skin_colors: "fair".to_string(),
            eye_colors: "brown".to_string(),
            language: "Galactic Basic".to_string(),
            planet_id,
        }
    }

    fn new_character(name: &str, species: Vec<String>) -> NewCharacter {
        NewCharacter {
            name: name.to_string(),
            height: "172".to_string(),
            mass: "77".to_string(),
            hair_color: "blond".to_string(),
            skin_color: "fair".to_string(),
            eye_color: "blue".to_string(),
            birth_year: "19BBY".to_string(),
            gender: "male".to_string(),
            planet_id: None,
            species,
        }
    }

    #[tokio::test]
    async fn update_can_clear_the_homeworld_reference() {
        let (planet_repo, species_repo, _) = setup();

        let planet = planet_repo.create_planet(new_planet("Coruscant")).await.unwrap();
        let created = species_repo
            .create_species(new_species("Human", Some(planet.id.clone())))
            .await
            .unwrap();
        assert_eq!(created.planet.as_ref().unwrap().id, planet.id);

        let updated = species_repo
            .update_species(&created.species.id, new_species("Human", None))
            .await
            .unwrap();

        assert!(updated.species.planet_id.is_none());
        assert!(updated.planet.is_none());
    }

    #[tokio::test]
    async fn deleting_species_cascades_out_of_character_associations() {
        let (_, species_repo, character_repo) = setup();

        let species = species_repo.create_species(new_species("Wookiee", None)).await.unwrap();
        let character = character_repo
            .create_character(new_character("Chewbacca", vec![species.species.id.clone()]))
            .await
            .unwrap();
        assert_eq!(character.species.len(), 1);

        species_repo.delete_species(&species.species.id).await.unwrap();

        let details = character_repo.get_character(&character.character.id).unwrap();
        assert!(details.species.is_empty());
    }
}
