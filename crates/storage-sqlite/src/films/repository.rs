use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use holocron_core::films::{Film, FilmDetails, FilmRepositoryTrait, NewFilm};
use holocron_core::planets::Planet;
use holocron_core::{Error, Result};

use crate::characters::load_character_details;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::planets::PlanetDB;
use crate::schema::{
    film_characters, film_planets, film_species, film_starships, film_vehicles, films, planets,
};
use crate::species::load_species_details;
use crate::starships::load_starship_details;
use crate::vehicles::load_vehicle_details;

use super::model::{
    FilmCharacterDB, FilmDB, FilmPlanetDB, FilmSpeciesDB, FilmStarshipDB, FilmVehicleDB,
};

/// Local ids for the five relation sets of one film.
#[derive(Debug, Clone, Default)]
pub(crate) struct FilmAssociations {
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub species: Vec<String>,
    pub vehicles: Vec<String>,
    pub starships: Vec<String>,
}

impl From<&NewFilm> for FilmAssociations {
    fn from(new_film: &NewFilm) -> Self {
        Self {
            characters: new_film.characters.clone(),
            planets: new_film.planets.clone(),
            species: new_film.species.clone(),
            vehicles: new_film.vehicles.clone(),
            starships: new_film.starships.clone(),
        }
    }
}

fn dedup(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect()
}

/// Replace all five association sets of a film with exactly the given
/// membership (duplicates collapsed).
pub(crate) fn replace_film_associations(
    conn: &mut SqliteConnection,
    film_id: &str,
    associations: &FilmAssociations,
) -> Result<()> {
    diesel::delete(film_characters::table.filter(film_characters::film_id.eq(film_id)))
        .execute(conn)
        .map_err(StorageError::from)?;
    let rows: Vec<FilmCharacterDB> = dedup(&associations.characters)
        .into_iter()
        .map(|character_id| FilmCharacterDB {
            film_id: film_id.to_string(),
            character_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(film_characters::table)
            .values(&rows)
            .execute(conn)
            .map_err(StorageError::from)?;
    }

    diesel::delete(film_planets::table.filter(film_planets::film_id.eq(film_id)))
        .execute(conn)
        .map_err(StorageError::from)?;
    let rows: Vec<FilmPlanetDB> = dedup(&associations.planets)
        .into_iter()
        .map(|planet_id| FilmPlanetDB {
            film_id: film_id.to_string(),
            planet_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(film_planets::table)
            .values(&rows)
            .execute(conn)
            .map_err(StorageError::from)?;
    }

    diesel::delete(film_species::table.filter(film_species::film_id.eq(film_id)))
        .execute(conn)
        .map_err(StorageError::from)?;
    let rows: Vec<FilmSpeciesDB> = dedup(&associations.species)
        .into_iter()
        .map(|species_id| FilmSpeciesDB {
            film_id: film_id.to_string(),
            species_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(film_species::table)
            .values(&rows)
            .execute(conn)
            .map_err(StorageError::from)?;
    }

    diesel::delete(film_vehicles::table.filter(film_vehicles::film_id.eq(film_id)))
        .execute(conn)
        .map_err(StorageError::from)?;
    let rows: Vec<FilmVehicleDB> = dedup(&associations.vehicles)
        .into_iter()
        .map(|vehicle_id| FilmVehicleDB {
            film_id: film_id.to_string(),
            vehicle_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(film_vehicles::table)
            .values(&rows)
            .execute(conn)
            .map_err(StorageError::from)?;
    }

    diesel::delete(film_starships::table.filter(film_starships::film_id.eq(film_id)))
        .execute(conn)
        .map_err(StorageError::from)?;
    let rows: Vec<FilmStarshipDB> = dedup(&associations.starships)
        .into_iter()
        .map(|starship_id| FilmStarshipDB {
            film_id: film_id.to_string(),
            starship_id,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(film_starships::table)
            .values(&rows)
            .execute(conn)
            .map_err(StorageError::from)?;
    }

    Ok(())
}

/// Load film rows with all five related collections embedded. `ids`
/// restricts the result; `None` loads the whole collection.
pub(crate) fn load_film_details(
    conn: &mut SqliteConnection,
    ids: Option<&[String]>,
) -> Result<Vec<FilmDetails>> {
    let rows: Vec<FilmDB> = match ids {
        Some(ids) => films::table
            .filter(films::id.eq_any(ids))
            .order(films::episode_id.asc())
            .select(FilmDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
        None => films::table
            .order(films::episode_id.asc())
            .select(FilmDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
    };

    let film_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();

    let character_links: Vec<FilmCharacterDB> = film_characters::table
        .filter(film_characters::film_id.eq_any(&film_ids))
        .select(FilmCharacterDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;
    let planet_links: Vec<FilmPlanetDB> = film_planets::table
        .filter(film_planets::film_id.eq_any(&film_ids))
        .select(FilmPlanetDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;
    let species_links: Vec<FilmSpeciesDB> = film_species::table
        .filter(film_species::film_id.eq_any(&film_ids))
        .select(FilmSpeciesDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;
    let vehicle_links: Vec<FilmVehicleDB> = film_vehicles::table
        .filter(film_vehicles::film_id.eq_any(&film_ids))
        .select(FilmVehicleDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;
    let starship_links: Vec<FilmStarshipDB> = film_starships::table
        .filter(film_starships::film_id.eq_any(&film_ids))
        .select(FilmStarshipDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;

    let character_ids: Vec<String> = character_links
        .iter()
        .map(|link| link.character_id.clone())
        .collect();
    let characters_by_id: HashMap<String, _> = load_character_details(conn, Some(&character_ids))?
        .into_iter()
        .map(|details| (details.character.id.clone(), details))
        .collect();

    let planet_ids: Vec<String> = planet_links
        .iter()
        .map(|link| link.planet_id.clone())
        .collect();
    let planets_by_id: HashMap<String, Planet> = planets::table
        .filter(planets::id.eq_any(&planet_ids))
        .select(PlanetDB::as_select())
        .load::<PlanetDB>(conn)
        .map_err(StorageError::from)?
        .into_iter()
        .map(|row| (row.id.clone(), Planet::from(row)))
        .collect();

    let species_ids: Vec<String> = species_links
        .iter()
        .map(|link| link.species_id.clone())
        .collect();
    let species_by_id: HashMap<String, _> = load_species_details(conn, Some(&species_ids))?
        .into_iter()
        .map(|details| (details.species.id.clone(), details))
        .collect();

    let vehicle_ids: Vec<String> = vehicle_links
        .iter()
        .map(|link| link.vehicle_id.clone())
        .collect();
    let vehicles_by_id: HashMap<String, _> = load_vehicle_details(conn, Some(&vehicle_ids))?
        .into_iter()
        .map(|details| (details.vehicle.id.clone(), details))
        .collect();

    let starship_ids: Vec<String> = starship_links
        .iter()
        .map(|link| link.starship_id.clone())
        .collect();
    let starships_by_id: HashMap<String, _> = load_starship_details(conn, Some(&starship_ids))?
        .into_iter()
        .map(|details| (details.starship.id.clone(), details))
        .collect();

    let mut characters_per_film: HashMap<String, Vec<String>> = HashMap::new();
    for link in character_links {
        characters_per_film
            .entry(link.film_id)
            .or_default()
            .push(link.character_id);
    }
    let mut planets_per_film: HashMap<String, Vec<String>> = HashMap::new();
    for link in planet_links {
        planets_per_film
            .entry(link.film_id)
            .or_default()
            .push(link.planet_id);
    }
    let mut species_per_film: HashMap<String, Vec<String>> = HashMap::new();
    for link in species_links {
        species_per_film
            .entry(link.film_id)
            .or_default()
            .push(link.species_id);
    }
    let mut vehicles_per_film: HashMap<String, Vec<String>> = HashMap::new();
    for link in vehicle_links {
        vehicles_per_film
            .entry(link.film_id)
            .or_default()
            .push(link.vehicle_id);
    }
    let mut starships_per_film: HashMap<String, Vec<String>> = HashMap::new();
    for link in starship_links {
        starships_per_film
            .entry(link.film_id)
            .or_default()
            .push(link.starship_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let characters = characters_per_film
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| characters_by_id.get(&id).cloned())
                .collect();
            let film_planets = planets_per_film
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| planets_by_id.get(&id).cloned())
                .collect();
            let species = species_per_film
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| species_by_id.get(&id).cloned())
                .collect();
            let vehicles = vehicles_per_film
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| vehicles_by_id.get(&id).cloned())
                .collect();
            let starships = starships_per_film
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| starships_by_id.get(&id).cloned())
                .collect();
            FilmDetails {
                film: Film::from(row),
                characters,
                planets: film_planets,
                species,
                vehicles,
                starships,
            }
        })
        .collect())
}

pub(crate) fn get_film_details(conn: &mut SqliteConnection, film_id: &str) -> Result<FilmDetails> {
    load_film_details(conn, Some(&[film_id.to_string()]))?
        .pop()
        .ok_or_else(|| Error::not_found("Film"))
}

pub struct FilmRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FilmRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FilmRepositoryTrait for FilmRepository {
    fn list_films(&self) -> Result<Vec<FilmDetails>> {
        let mut conn = get_connection(&self.pool)?;
        load_film_details(&mut conn, None)
    }

    fn get_film(&self, film_id: &str) -> Result<FilmDetails> {
        let mut conn = get_connection(&self.pool)?;
        get_film_details(&mut conn, film_id)
    }

    async fn create_film(&self, new_film: NewFilm) -> Result<FilmDetails> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let row = FilmDB::from_new(&new_film, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(films::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_film_associations(conn, &row.id, &FilmAssociations::from(&new_film))?;
                get_film_details(conn, &row.id)
            })
            .await
    }

    async fn update_film(&self, film_id: &str, update: NewFilm) -> Result<FilmDetails> {
        let film_id = film_id.to_string();
        self.writer
            .exec(move |conn| {
                let current = films::table
                    .find(&film_id)
                    .select(FilmDB::as_select())
                    .first::<FilmDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Film"))?;

                let row = FilmDB::from_new(
                    &update,
                    current.id.clone(),
                    current.created_at,
                    Utc::now().naive_utc(),
                );
                diesel::update(films::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_film_associations(conn, &current.id, &FilmAssociations::from(&update))?;
                get_film_details(conn, &current.id)
            })
            .await
    }

    async fn delete_film(&self, film_id: &str) -> Result<usize> {
        let film_id = film_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(films::table.find(&film_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found("Film"));
                }
                Ok(affected)
            })
            .await
    }
}
