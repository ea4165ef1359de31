use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use holocron_core::species::{NewSpecies, Species};
use holocron_core::sync::SpeciesRecord;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::species)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct SpeciesDB {
    pub id: String,
    pub name: String,
    pub classification: String,
    pub designation: String,
    pub average_height: String,
    pub average_lifespan: String,
    pub hair_colors: String,
    pub skin_colors: String,
    pub eye_colors: String,
    pub language: String,
    pub planet_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SpeciesDB {
    pub fn from_new(
        new_species: &NewSpecies,
        planet_id: Option<String>,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: new_species.name.clone(),
            classification: new_species.classification.clone(),
            designation: new_species.designation.clone(),
            average_height: new_species.average_height.clone(),
            average_lifespan: new_species.average_lifespan.clone(),
            hair_colors: new_species.hair_colors.clone(),
            skin_colors: new_species.skin_colors.clone(),
            eye_colors: new_species.eye_colors.clone(),
            language: new_species.language.clone(),
            planet_id,
            created_at,
            updated_at,
        }
    }

    pub fn from_record(
        record: &SpeciesRecord,
        planet_id: Option<String>,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: record.name.clone(),
            classification: record.classification.clone(),
            designation: record.designation.clone(),
            average_height: record.average_height.clone(),
            average_lifespan: record.average_lifespan.clone(),
            hair_colors: record.hair_colors.clone(),
            skin_colors: record.skin_colors.clone(),
            eye_colors: record.eye_colors.clone(),
            language: record.language.clone(),
            planet_id,
            created_at,
            updated_at,
        }
    }
}

impl From<SpeciesDB> for Species {
    fn from(row: SpeciesDB) -> Self {
        Species {
            id: row.id,
            name: row.name,
            classification: row.classification,
            designation: row.designation,
            average_height: row.average_height,
            average_lifespan: row.average_lifespan,
            hair_colors: row.hair_colors,
            skin_colors: row.skin_colors,
            eye_colors: row.eye_colors,
            language: row.language,
            planet_id: row.planet_id,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}
