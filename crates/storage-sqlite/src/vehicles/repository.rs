use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use holocron_core::vehicles::{NewVehicle, Vehicle, VehicleDetails, VehicleRepositoryTrait};
use holocron_core::{Error, Result};

use crate::characters::load_character_details;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{vehicle_pilots, vehicles};

use super::model::{VehicleDB, VehiclePilotDB};

/// Load vehicle rows with their pilots embedded. `ids` restricts the result;
/// `None` loads the whole collection.
pub(crate) fn load_vehicle_details(
    conn: &mut SqliteConnection,
    ids: Option<&[String]>,
) -> Result<Vec<VehicleDetails>> {
    let rows: Vec<VehicleDB> = match ids {
        Some(ids) => vehicles::table
            .filter(vehicles::id.eq_any(ids))
            .order(vehicles::name.asc())
            .select(VehicleDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
        None => vehicles::table
            .order(vehicles::name.asc())
            .select(VehicleDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
    };

    let vehicle_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let links: Vec<VehiclePilotDB> = vehicle_pilots::table
        .filter(vehicle_pilots::vehicle_id.eq_any(&vehicle_ids))
        .select(VehiclePilotDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;

    let pilot_ids: Vec<String> = links.iter().map(|link| link.character_id.clone()).collect();
    let pilots_by_id: HashMap<String, _> = load_character_details(conn, Some(&pilot_ids))?
        .into_iter()
        .map(|details| (details.character.id.clone(), details))
        .collect();

    let mut pilots_per_vehicle: HashMap<String, Vec<String>> = HashMap::new();
    for link in links {
        pilots_per_vehicle
            .entry(link.vehicle_id)
            .or_default()
            .push(link.character_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let pilots = pilots_per_vehicle
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|character_id| pilots_by_id.get(&character_id).cloned())
                .collect();
            VehicleDetails {
                vehicle: Vehicle::from(row),
                pilots,
            }
        })
        .collect())
}

pub(crate) fn get_vehicle_details(
    conn: &mut SqliteConnection,
    vehicle_id: &str,
) -> Result<VehicleDetails> {
    load_vehicle_details(conn, Some(&[vehicle_id.to_string()]))?
        .pop()
        .ok_or_else(|| Error::not_found("Vehicle"))
}

/// Replace the vehicle's pilot association set with exactly the given
/// membership (duplicates collapsed).
pub(crate) fn replace_vehicle_pilots(
    conn: &mut SqliteConnection,
    vehicle_id: &str,
    character_ids: &[String],
) -> Result<()> {
    diesel::delete(vehicle_pilots::table.filter(vehicle_pilots::vehicle_id.eq(vehicle_id)))
        .execute(conn)
        .map_err(StorageError::from)?;

    let mut seen = HashSet::new();
    let links: Vec<VehiclePilotDB> = character_ids
        .iter()
        .filter(|character_id| seen.insert((*character_id).clone()))
        .map(|character_id| VehiclePilotDB {
            vehicle_id: vehicle_id.to_string(),
            character_id: character_id.clone(),
        })
        .collect();

    if !links.is_empty() {
        diesel::insert_into(vehicle_pilots::table)
            .values(&links)
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(())
}

pub struct VehicleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl VehicleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl VehicleRepositoryTrait for VehicleRepository {
    fn list_vehicles(&self) -> Result<Vec<VehicleDetails>> {
        let mut conn = get_connection(&self.pool)?;
        load_vehicle_details(&mut conn, None)
    }

    fn get_vehicle(&self, vehicle_id: &str) -> Result<VehicleDetails> {
        let mut conn = get_connection(&self.pool)?;
        get_vehicle_details(&mut conn, vehicle_id)
    }

    async fn create_vehicle(&self, new_vehicle: NewVehicle) -> Result<VehicleDetails> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let row = VehicleDB::from_new(&new_vehicle, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(vehicles::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_vehicle_pilots(conn, &row.id, &new_vehicle.pilots)?;
                get_vehicle_details(conn, &row.id)
            })
            .await
    }

    async fn update_vehicle(&self, vehicle_id: &str, update: NewVehicle) -> Result<VehicleDetails> {
        let vehicle_id = vehicle_id.to_string();
        self.writer
            .exec(move |conn| {
                let current = vehicles::table
                    .find(&vehicle_id)
                    .select(VehicleDB::as_select())
                    .first::<VehicleDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Vehicle"))?;

                let row = VehicleDB::from_new(
                    &update,
                    current.id.clone(),
                    current.created_at,
                    Utc::now().naive_utc(),
                );
                diesel::update(vehicles::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_vehicle_pilots(conn, &current.id, &update.pilots)?;
                get_vehicle_details(conn, &current.id)
            })
            .await
    }

    async fn delete_vehicle(&self, vehicle_id: &str) -> Result<usize> {
        let vehicle_id = vehicle_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(vehicles::table.find(&vehicle_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found("Vehicle"));
                }
                Ok(affected)
            })
            .await
    }
}
