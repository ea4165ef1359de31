use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;

use holocron_core::films::{Film, NewFilm};
use holocron_core::sync::FilmRecord;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::films)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmDB {
    pub id: String,
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(film_id, character_id))]
#[diesel(table_name = crate::schema::film_characters)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmCharacterDB {
    pub film_id: String,
    pub character_id: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(film_id, planet_id))]
#[diesel(table_name = crate::schema::film_planets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmPlanetDB {
    pub film_id: String,
    pub planet_id: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(film_id, species_id))]
#[diesel(table_name = crate::schema::film_species)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmSpeciesDB {
    pub film_id: String,
    pub species_id: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(film_id, vehicle_id))]
#[diesel(table_name = crate::schema::film_vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmVehicleDB {
    pub film_id: String,
    pub vehicle_id: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(film_id, starship_id))]
#[diesel(table_name = crate::schema::film_starships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmStarshipDB {
    pub film_id: String,
    pub starship_id: String,
}

impl FilmDB {
    pub fn from_new(
        new_film: &NewFilm,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: new_film.title.clone(),
            episode_id: new_film.episode_id,
            opening_crawl: new_film.opening_crawl.clone(),
            director: new_film.director.clone(),
            producer: new_film.producer.clone(),
            release_date: new_film.release_date,
            created_at,
            updated_at,
        }
    }

    pub fn from_record(
        record: &FilmRecord,
        release_date: NaiveDate,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: record.title.clone(),
            episode_id: record.episode_id,
            opening_crawl: record.opening_crawl.clone(),
            director: record.director.clone(),
            producer: record.producer.clone(),
            release_date,
            created_at,
            updated_at,
        }
    }
}

impl From<FilmDB> for Film {
    fn from(row: FilmDB) -> Self {
        Film {
            id: row.id,
            title: row.title,
            episode_id: row.episode_id,
            opening_crawl: row.opening_crawl,
            director: row.director,
            producer: row.producer,
            release_date: row.release_date,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}
