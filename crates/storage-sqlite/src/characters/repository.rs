use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use holocron_core::characters::{
    Character, CharacterDetails, CharacterRepositoryTrait, NewCharacter,
};
use holocron_core::planets::Planet;
use holocron_core::{Error, Result};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::planets::PlanetDB;
use crate::schema::{character_species, characters, planets};
use crate::species::load_species_details;

use super::model::{CharacterDB, CharacterSpeciesDB};

/// Load character rows with homeworld and species embedded. `ids` restricts
/// the result; `None` loads the whole collection.
pub(crate) fn load_character_details(
    conn: &mut SqliteConnection,
    ids: Option<&[String]>,
) -> Result<Vec<CharacterDetails>> {
    let rows: Vec<CharacterDB> = match ids {
        Some(ids) => characters::table
            .filter(characters::id.eq_any(ids))
            .order(characters::name.asc())
            .select(CharacterDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
        None => characters::table
            .order(characters::name.asc())
            .select(CharacterDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
    };

    let character_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();

    let planet_ids: Vec<String> = rows.iter().filter_map(|row| row.planet_id.clone()).collect();
    let planets_by_id: HashMap<String, Planet> = planets::table
        .filter(planets::id.eq_any(&planet_ids))
        .select(PlanetDB::as_select())
        .load::<PlanetDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(|row| (row.id.clone(), Planet::from(row)))
        .collect();

    let links: Vec<CharacterSpeciesDB> = character_species::table
        .filter(character_species::character_id.eq_any(&character_ids))
        .select(CharacterSpeciesDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;

    let species_ids: Vec<String> = links.iter().map(|link| link.species_id.clone()).collect();
    let species_by_id: HashMap<String, _> = load_species_details(conn, Some(&species_ids))?
        .into_iter()
        .map(|details| (details.species.id.clone(), details))
        .collect();

    let mut species_per_character: HashMap<String, Vec<String>> = HashMap::new();
    for link in links {
        species_per_character
            .entry(link.character_id)
            .or_default()
            .push(link.species_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let planet = row
                .planet_id
                .as_ref()
                .and_then(|planet_id| planets_by_id.get(planet_id))
                .cloned();
            let species = species_per_character
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|species_id| species_by_id.get(&species_id).cloned())
                .collect();
            CharacterDetails {
                character: Character::from(row),
                planet,
                species,
            }
        })
        .collect())
}

pub(crate) fn get_character_details(
    conn: &mut SqliteConnection,
    character_id: &str,
) -> Result<CharacterDetails> {
    load_character_details(conn, Some(&[character_id.to_string()]))?
        .pop()
        .ok_or_else(|| Error::not_found("Character"))
}

/// Replace the character's species association set with exactly the given
/// membership (duplicates collapsed).
pub(crate) fn replace_character_species(
    conn: &mut SqliteConnection,
    character_id: &str,
    species_ids: &[String],
) -> Result<()> {
    diesel::delete(
        character_species::table.filter(character_species::character_id.eq(character_id)),
    )
    .execute(conn)
    .map_err(StorageError::from)?;

    let mut seen = HashSet::new();
    let links: Vec<CharacterSpeciesDB> = species_ids
        .iter()
        .filter(|species_id| seen.insert((*species_id).clone()))
        .map(|species_id| CharacterSpeciesDB {
            character_id: character_id.to_string(),
            species_id: species_id.clone(),
        })
        .collect();

    if !links.is_empty() {
        diesel::insert_into(character_species::table)
            .values(&links)
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(())
}

pub struct CharacterRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CharacterRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CharacterRepositoryTrait for CharacterRepository {
    fn list_characters(&self) -> Result<Vec<CharacterDetails>> {
        let mut conn = get_connection(&self.pool)?;
        load_character_details(&mut conn, None)
    }

    fn get_character(&self, character_id: &str) -> Result<CharacterDetails> {
        let mut conn = get_connection(&self.pool)?;
        get_character_details(&mut conn, character_id)
    }

    async fn create_character(&self, new_character: NewCharacter) -> Result<CharacterDetails> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let row = CharacterDB::from_new(
                    &new_character,
                    new_character.planet_id.clone(),
                    Uuid::new_v4().to_string(),
                    now,
                    now,
                );
                diesel::insert_into(characters::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_character_species(conn, &row.id, &new_character.species)?;
                get_character_details(conn, &row.id)
            })
            .await
    }

    async fn update_character(
        &self,
        character_id: &str,
        update: NewCharacter,
    ) -> Result<CharacterDetails> {
        let character_id = character_id.to_string();
        self.writer
            .exec(move |conn| {
                let current = characters::table
                    .find(&character_id)
                    .select(CharacterDB::as_select())
                    .first::<CharacterDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Character"))?;

                let row = CharacterDB::from_new(
                    &update,
                    update.planet_id.clone(),
                    current.id.clone(),
                    current.created_at,
                    Utc::now().naive_utc(),
                );
                diesel::update(characters::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_character_species(conn, &current.id, &update.species)?;
                get_character_details(conn, &current.id)
            })
            .await
    }

    async fn delete_character(&self, character_id: &str) -> Result<usize> {
        let character_id = character_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(characters::table.find(&character_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found("Character"));
                }
                Ok(affected)
            })
            .await
    }
}
