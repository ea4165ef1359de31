use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use holocron_core::planets::{NewPlanet, Planet};
use holocron_core::sync::PlanetRecord;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::planets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlanetDB {
    pub id: String,
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PlanetDB {
    pub fn from_new(
        new_planet: &NewPlanet,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: new_planet.name.clone(),
            rotation_period: new_planet.rotation_period.clone(),
            orbital_period: new_planet.orbital_period.clone(),
            diameter: new_planet.diameter.clone(),
            climate: new_planet.climate.clone(),
            gravity: new_planet.gravity.clone(),
            terrain: new_planet.terrain.clone(),
            surface_water: new_planet.surface_water.clone(),
            population: new_planet.population.clone(),
            created_at,
            updated_at,
        }
    }

    pub fn from_record(
        record: &PlanetRecord,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: record.name.clone(),
            rotation_period: record.rotation_period.clone(),
            orbital_period: record.orbital_period.clone(),
            diameter: record.diameter.clone(),
            climate: record.climate.clone(),
            gravity: record.gravity.clone(),
            terrain: record.terrain.clone(),
            surface_water: record.surface_water.clone(),
            population: record.population.clone(),
            created_at,
            updated_at,
        }
    }
}

impl From<PlanetDB> for Planet {
    fn from(row: PlanetDB) -> Self {
        Planet {
            id: row.id,
            name: row.name,
            rotation_period: row.rotation_period,
            orbital_period: row.orbital_period,
            diameter: row.diameter,
            climate: row.climate,
            gravity: row.gravity,
            terrain: row.terrain,
            surface_water: row.surface_water,
            population: row.population,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}
