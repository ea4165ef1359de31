use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use holocron_core::planets::{NewPlanet, Planet, PlanetRepositoryTrait};
use holocron_core::{Error, Result};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::planets;

use super::model::PlanetDB;

pub struct PlanetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlanetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PlanetRepositoryTrait for PlanetRepository {
    fn list_planets(&self) -> Result<Vec<Planet>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = planets::table
            .order(planets::name.asc())
            .select(PlanetDB::as_select())
            .load::<PlanetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Planet::from).collect())
    }

    fn get_planet(&self, planet_id: &str) -> Result<Planet> {
        let mut conn = get_connection(&self.pool)?;
        let row = planets::table
            .find(planet_id)
            .select(PlanetDB::as_select())
            .first::<PlanetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .ok_or_else(|| Error::not_found("Planet"))?;
        Ok(Planet::from(row))
    }

    async fn create_planet(&self, new_planet: NewPlanet) -> Result<Planet> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let row = PlanetDB::from_new(&new_planet, Uuid::new_v4().to_string(), now, now);
                let created = diesel::insert_into(planets::table)
                    .values(&row)
                    .returning(PlanetDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Planet::from(created))
            })
            .await
    }

    async fn update_planet(&self, planet_id: &str, update: NewPlanet) -> Result<Planet> {
        let planet_id = planet_id.to_string();
        self.writer
            .exec(move |conn| {
                let current = planets::table
                    .find(&planet_id)
                    .select(PlanetDB::as_select())
                    .first::<PlanetDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Planet"))?;

                let row = PlanetDB::from_new(
                    &update,
                    current.id.clone(),
                    current.created_at,
                    Utc::now().naive_utc(),
                );
                diesel::update(planets::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(Planet::from(row))
            })
            .await
    }

    async fn delete_planet(&self, planet_id: &str) -> Result<usize> {
        let planet_id = planet_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(planets::table.find(&planet_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found("Planet"));
                }
                Ok(affected)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, init, run_migrations, spawn_writer};
    use tempfile::tempdir;

    fn setup() -> PlanetRepository {
        let app_data = tempdir()
            .expect("tempdir")
            .keep()
            .to_string_lossy()
            .to_string();
        let db_path = init(&app_data).expect("init db");
        run_migrations(&db_path).expect("migrate db");
        let pool = create_pool(&db_path).expect("create pool");
        let writer = spawn_writer(pool.as_ref().clone());
        PlanetRepository::new(pool, writer)
    }

    fn tatooine() -> NewPlanet {
        NewPlanet {
            name: "Tatooine".to_string(),
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

    #[tokio::test]
    async fn create_get_update_delete_roundtrip() {
        let repo = setup();

        let created = repo.create_planet(tatooine()).await.expect("create");
        assert_eq!(created.name, "Tatooine");

        let fetched = repo.get_planet(&created.id).expect("get");
        assert_eq!(fetched.id, created.id);

        let mut update = tatooine();
        update.population = "120000".to_string();
        let updated = repo.update_planet(&created.id, update).await.expect("update");
        assert_eq!(updated.population, "120000");
        assert_eq!(updated.id, created.id);

        repo.delete_planet(&created.id).await.expect("delete");
        assert!(matches!(
            repo.get_planet(&created.id),
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let repo = setup();
        repo.create_planet(tatooine()).await.expect("create");

        let err = repo.create_planet(tatooine()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
