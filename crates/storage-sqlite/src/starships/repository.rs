use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use holocron_core::starships::{NewStarship, Starship, StarshipDetails, StarshipRepositoryTrait};
use holocron_core::{Error, Result};

use crate::characters::load_character_details;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{starship_pilots, starships};

use super::model::{StarshipDB, StarshipPilotDB};

/// Load starship rows with their pilots embedded. `ids` restricts the
/// result; `None` loads the whole collection.
pub(crate) fn load_starship_details(
    conn: &mut SqliteConnection,
    ids: Option<&[String]>,
) -> Result<Vec<StarshipDetails>> {
    let rows: Vec<StarshipDB> = match ids {
        Some(ids) => starships::table
            .filter(starships::id.eq_any(ids))
            .order(starships::name.asc())
            .select(StarshipDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
        None => starships::table
            .order(starships::name.asc())
            .select(StarshipDB::as_select())
            .load(conn)
            .map_err(StorageError::from)?,
    };

    let starship_ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
    let links: Vec<StarshipPilotDB> = starship_pilots::table
        .filter(starship_pilots::starship_id.eq_any(&starship_ids))
        .select(StarshipPilotDB::as_select())
        .load(conn)
        .map_err(StorageError::from)?;

    let pilot_ids: Vec<String> = links.iter().map(|link| link.character_id.clone()).collect();
    let pilots_by_id: HashMap<String, _> = load_character_details(conn, Some(&pilot_ids))?
        .into_iter()
        .map(|details| (details.character.id.clone(), details))
        .collect();

    let mut pilots_per_starship: HashMap<String, Vec<String>> = HashMap::new();
    for link in links {
        pilots_per_starship
            .entry(link.starship_id)
            .or_default()
            .push(link.character_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let pilots = pilots_per_starship
                .remove(&row.id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|character_id| pilots_by_id.get(&character_id).cloned())
                .collect();
            StarshipDetails {
                starship: Starship::from(row),
                pilots,
            }
        })
        .collect())
}

pub(crate) fn get_starship_details(
    conn: &mut SqliteConnection,
    starship_id: &str,
) -> Result<StarshipDetails> {
    load_starship_details(conn, Some(&[starship_id.to_string()]))?
        .pop()
        .ok_or_else(|| Error::not_found("Starship"))
}

/// Replace the starship's pilot association set with exactly the given
/// membership (duplicates collapsed).
pub(crate) fn replace_starship_pilots(
    conn: &mut SqliteConnection,
    starship_id: &str,
    character_ids: &[String],
) -> Result<()> {
    diesel::delete(starship_pilots::table.filter(starship_pilots::starship_id.eq(starship_id)))
        .execute(conn)
        .map_err(StorageError::from)?;

    let mut seen = HashSet::new();
    let links: Vec<StarshipPilotDB> = character_ids
        .iter()
        .filter(|character_id| seen.insert((*character_id).clone()))
        .map(|character_id| StarshipPilotDB {
            starship_id: starship_id.to_string(),
            character_id: character_id.clone(),
        })
        .collect();

    if !links.is_empty() {
        diesel::insert_into(starship_pilots::table)
            .values(&links)
            .execute(conn)
            .map_err(StorageError::from)?;
    }
    Ok(())
}

pub struct StarshipRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StarshipRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl StarshipRepositoryTrait for StarshipRepository {
    fn list_starships(&self) -> Result<Vec<StarshipDetails>> {
        let mut conn = get_connection(&self.pool)?;
        load_starship_details(&mut conn, None)
    }

    fn get_starship(&self, starship_id: &str) -> Result<StarshipDetails> {
        let mut conn = get_connection(&self.pool)?;
        get_starship_details(&mut conn, starship_id)
    }

    async fn create_starship(&self, new_starship: NewStarship) -> Result<StarshipDetails> {
        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let row = StarshipDB::from_new(&new_starship, Uuid::new_v4().to_string(), now, now);
                diesel::insert_into(starships::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_starship_pilots(conn, &row.id, &new_starship.pilots)?;
                get_starship_details(conn, &row.id)
            })
            .await
    }

    async fn update_starship(
        &self,
        starship_id: &str,
        update: NewStarship,
    ) -> Result<StarshipDetails> {
        let starship_id = starship_id.to_string();
        self.writer
            .exec(move |conn| {
                let current = starships::table
                    .find(&starship_id)
                    .select(StarshipDB::as_select())
                    .first::<StarshipDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::not_found("Starship"))?;

                let row = StarshipDB::from_new(
                    &update,
                    current.id.clone(),
                    current.created_at,
                    Utc::now().naive_utc(),
                );
                diesel::update(starships::table.find(&current.id))
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                replace_starship_pilots(conn, &current.id, &update.pilots)?;
                get_starship_details(conn, &current.id)
            })
            .await
    }

    async fn delete_starship(&self, starship_id: &str) -> Result<usize> {
        let starship_id = starship_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(starships::table.find(&starship_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if affected == 0 {
                    return Err(Error::not_found("Starship"));
                }
                Ok(affected)
            })
            .await
    }
}
