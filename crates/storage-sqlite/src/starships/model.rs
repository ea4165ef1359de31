use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use holocron_core::starships::{NewStarship, Starship};
use holocron_core::sync::StarshipRecord;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::starships)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StarshipDB {
    pub id: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub hyperdrive_rating: String,
    pub mglt: String,
    pub starship_class: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(starship_id, character_id))]
#[diesel(table_name = crate::schema::starship_pilots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StarshipPilotDB {
    pub starship_id: String,
    pub character_id: String,
}

impl StarshipDB {
    pub fn from_new(
        new_starship: &NewStarship,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: new_starship.name.clone(),
            model: new_starship.model.clone(),
            manufacturer: new_starship.manufacturer.clone(),
            cost_in_credits: new_starship.cost_in_credits.clone(),
            length: new_starship.length.clone(),
            max_atmosphering_speed: new_starship.max_atmosphering_speed.clone(),
            crew: new_starship.crew.clone(),
            passengers: new_starship.passengers.clone(),
            cargo_capacity: new_starship.cargo_capacity.clone(),
            consumables: new_starship.consumables.clone(),
            hyperdrive_rating: new_starship.hyperdrive_rating.clone(),
            mglt: new_starship.mglt.clone(),
            starship_class: new_starship.starship_class.clone(),
            created_at,
            updated_at,
        }
    }

    pub fn from_record(
        record: &StarshipRecord,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: record.name.clone(),
            model: record.model.clone(),
            manufacturer: record.manufacturer.clone(),
            cost_in_credits: record.cost_in_credits.clone(),
            length: record.length.clone(),
            max_atmosphering_speed: record.max_atmosphering_speed.clone(),
            crew: record.crew.clone(),
            passengers: record.passengers.clone(),
            cargo_capacity: record.cargo_capacity.clone(),
            consumables: record.consumables.clone(),
            hyperdrive_rating: record.hyperdrive_rating.clone(),
            mglt: record.mglt.clone(),
            starship_class: record.starship_class.clone(),
            created_at,
            updated_at,
        }
    }
}

impl From<StarshipDB> for Starship {
    fn from(row: StarshipDB) -> Self {
        Starship {
            id: row.id,
            name: row.name,
            model: row.model,
            manufacturer: row.manufacturer,
            cost_in_credits: row.cost_in_credits,
            length: row.length,
            max_atmosphering_speed: row.max_atmosphering_speed,
            crew: row.crew,
            passengers: row.passengers,
            cargo_capacity: row.cargo_capacity,
            consumables: row.consumables,
            hyperdrive_rating: row.hyperdrive_rating,
            mglt: row.mglt,
            starship_class: row.starship_class,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}
