//! Entity upsert stages of the catalog import pipeline.
//!
//! Each stage processes one collection on the writer connection, inside the
//! run's transaction: look up by natural key and overwrite scalar attributes,
//! or insert a fresh row; relink references through the resolver maps built
//! by earlier stages; replace to-many association sets with the resolved
//! membership; and record the row's local id under the record's external
//! identifier for later stages. Unresolved references are dropped, not
//! errors.

use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use holocron_core::sync::{
    CharacterRecord, FilmRecord, PlanetRecord, ResolverMap, SpeciesRecord, StarshipRecord,
    VehicleRecord,
};
use holocron_core::{Error, Result};

use crate::characters::{replace_character_species, CharacterDB};
use crate::errors::StorageError;
use crate::films::{replace_film_associations, FilmAssociations, FilmDB};
use crate::planets::PlanetDB;
use crate::schema::{characters, films, planets, species, starships, vehicles};
use crate::species::SpeciesDB;
use crate::starships::{replace_starship_pilots, StarshipDB};
use crate::vehicles::{replace_vehicle_pilots, VehicleDB};

pub(crate) fn import_planets(
    conn: &mut SqliteConnection,
    records: &[PlanetRecord],
) -> Result<ResolverMap> {
    let mut map = ResolverMap::new();
    for record in records {
        let now = Utc::now().naive_utc();
        let existing = planets::table
            .filter(planets::name.eq(&record.name))
            .select(PlanetDB::as_select())
            .first::<PlanetDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let planet_id = match existing {
            Some(current) => {
                let row =
                    PlanetDB::from_record(record, current.id.clone(), current.created_at, now);
                diesel::update(planets::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                current.id
            }
            None => {
                let row = PlanetDB::from_record(record, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(planets::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.id
            }
        };

        map.record(record.url.clone(), planet_id);
    }
    Ok(map)
}

pub(crate) fn import_species(
    conn: &mut SqliteConnection,
    records: &[SpeciesRecord],
    planet_map: &ResolverMap,
) -> Result<ResolverMap> {
    let mut map = ResolverMap::new();
    for record in records {
        let now = Utc::now().naive_utc();
        let planet_id = record
            .homeworld
            .as_deref()
            .and_then(|external_id| planet_map.resolve(external_id))
            .map(str::to_string);

        let existing = species::table
            .filter(species::name.eq(&record.name))
            .select(SpeciesDB::as_select())
            .first::<SpeciesDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let species_id = match existing {
            Some(current) => {
                let row = SpeciesDB::from_record(
                    record,
                    planet_id,
                    current.id.clone(),
                    current.created_at,
                    now,
                );
                diesel::update(species::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                current.id
            }
            None => {
                let row = SpeciesDB::from_record(
                    record,
                    planet_id,
                    Uuid::new_v4().to_string(),
                    now,
                    now,
                );
                diesel::insert_into(species::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.id
            }
        };

        map.record(record.url.clone(), species_id);
    }
    Ok(map)
}

pub(crate) fn import_characters(
    conn: &mut SqliteConnection,
    records: &[CharacterRecord],
    planet_map: &ResolverMap,
    species_map: &ResolverMap,
) -> Result<ResolverMap> {
    let mut map = ResolverMap::new();
    for record in records {
        let now = Utc::now().naive_utc();
        let planet_id = record
            .homeworld
            .as_deref()
            .and_then(|external_id| planet_map.resolve(external_id))
            .map(str::to_string);

        let existing = characters::table
            .filter(characters::name.eq(&record.name))
            .select(CharacterDB::as_select())
            .first::<CharacterDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let character_id = match existing {
            Some(current) => {
                let row = CharacterDB::from_record(
                    record,
                    planet_id,
                    current.id.clone(),
                    current.created_at,
                    now,
                );
                diesel::update(characters::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                current.id
            }
            None => {
                let row = CharacterDB::from_record(
                    record,
                    planet_id,
                    Uuid::new_v4().to_string(),
                    now,
                    now,
                );
                diesel::insert_into(characters::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.id
            }
        };

        replace_character_species(conn, &character_id, &species_map.resolve_all(&record.species))?;
        map.record(record.url.clone(), character_id);
    }
    Ok(map)
}

pub(crate) fn import_vehicles(
    conn: &mut SqliteConnection,
    records: &[VehicleRecord],
    character_map: &ResolverMap,
) -> Result<ResolverMap> {
    let mut map = ResolverMap::new();
    for record in records {
        let now = Utc::now().naive_utc();
        let existing = vehicles::table
            .filter(vehicles::name.eq(&record.name))
            .select(VehicleDB::as_select())
            .first::<VehicleDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let vehicle_id = match existing {
            Some(current) => {
                let row =
                    VehicleDB::from_record(record, current.id.clone(), current.created_at, now);
                diesel::update(vehicles::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                current.id
            }
            None => {
                let row = VehicleDB::from_record(record, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(vehicles::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.id
            }
        };

        replace_vehicle_pilots(conn, &vehicle_id, &character_map.resolve_all(&record.pilots))?;
        map.record(record.url.clone(), vehicle_id);
    }
    Ok(map)
}

pub(crate) fn import_starships(
    conn: &mut SqliteConnection,
    records: &[StarshipRecord],
    character_map: &ResolverMap,
) -> Result<ResolverMap> {
    let mut map = ResolverMap::new();
    for record in records {
        let now = Utc::now().naive_utc();
        let existing = starships::table
            .filter(starships::name.eq(&record.name))
            .select(StarshipDB::as_select())
            .first::<StarshipDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let starship_id = match existing {
            Some(current) => {
                let row =
                    StarshipDB::from_record(record, current.id.clone(), current.created_at, now);
                diesel::update(starships::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                current.id
            }
            None => {
                let row = StarshipDB::from_record(record, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(starships::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.id
            }
        };

        replace_starship_pilots(conn, &starship_id, &character_map.resolve_all(&record.pilots))?;
        map.record(record.url.clone(), starship_id);
    }
    Ok(map)
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn import_films(
    conn: &mut SqliteConnection,
    records: &[FilmRecord],
    character_map: &ResolverMap,
    planet_map: &ResolverMap,
    species_map: &ResolverMap,
    vehicle_map: &ResolverMap,
    starship_map: &ResolverMap,
) -> Result<usize> {
    for record in records {
        let now = Utc::now().naive_utc();
        let release_date =
            NaiveDate::parse_from_str(&record.release_date, "%Y-%m-%d").map_err(|e| {
                Error::validation(format!(
                    "Film '{}' has invalid release date '{}': {e}",
                    record.title, record.release_date
                ))
            })?;

        let existing = films::table
            .filter(films::title.eq(&record.title))
            .select(FilmDB::as_select())
            .first::<FilmDB>(conn)
            .optional()
            .map_err(StorageError::from)?;

        let film_id = match existing {
            Some(current) => {
                let row = FilmDB::from_record(
                    record,
                    release_date,
                    current.id.clone(),
                    current.created_at,
                    now,
                );
                diesel::update(films::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                current.id
            }
            None => {
                let row =
                    FilmDB::from_record(record, release_date, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(films::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                row.id
            }
        };

        let associations = FilmAssociations {
            characters: character_map.resolve_all(&record.characters),
            planets: planet_map.resolve_all(&record.planets),
            species: species_map.resolve_all(&record.species),
            vehicles: vehicle_map.resolve_all(&record.vehicles),
            starships: starship_map.resolve_all(&record.starships),
        };
        replace_film_associations(conn, &film_id, &associations)?;
    }
    Ok(records.len())
}
