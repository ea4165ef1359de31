use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use holocron_core::sync::VehicleRecord;
use holocron_core::vehicles::{NewVehicle, Vehicle};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VehicleDB {
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
    pub vehicle_class: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(vehicle_id, character_id))]
#[diesel(table_name = crate::schema::vehicle_pilots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VehiclePilotDB {
    pub vehicle_id: String,
    pub character_id: String,
}

impl VehicleDB {
    pub fn from_new(
        new_vehicle: &NewVehicle,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: new_vehicle.name.clone(),
            model: new_vehicle.model.clone(),
            manufacturer: new_vehicle.manufacturer.clone(),
            cost_in_credits: new_vehicle.cost_in_credits.clone(),
            length: new_vehicle.length.clone(),
            max_atmosphering_speed: new_vehicle.max_atmosphering_speed.clone(),
            crew: new_vehicle.crew.clone(),
            passengers: new_vehicle.passengers.clone(),
            cargo_capacity: new_vehicle.cargo_capacity.clone(),
            consumables: new_vehicle.consumables.clone(),
            vehicle_class: new_vehicle.vehicle_class.clone(),
            created_at,
            updated_at,
        }
    }

    pub fn from_record(
        record: &VehicleRecord,
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
            vehicle_class: record.vehicle_class.clone(),
            created_at,
            updated_at,
        }
    }
}

impl From<VehicleDB> for Vehicle {
    fn from(row: VehicleDB) -> Self {
        Vehicle {
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
            vehicle_class: row.vehicle_class,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}
