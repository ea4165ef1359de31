use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use holocron_core::characters::{Character, NewCharacter};
use holocron_core::sync::CharacterRecord;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::characters)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CharacterDB {
    pub id: String,
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub planet_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(primary_key(character_id, species_id))]
#[diesel(table_name = crate::schema::character_species)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CharacterSpeciesDB {
    pub character_id: String,
    pub species_id: String,
}

impl CharacterDB {
    pub fn from_new(
        new_character: &NewCharacter,
        planet_id: Option<String>,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: new_character.name.clone(),
            height: new_character.height.clone(),
            mass: new_character.mass.clone(),
            hair_color: new_character.hair_color.clone(),
            skin_color: new_character.skin_color.clone(),
            eye_color: new_character.eye_color.clone(),
            birth_year: new_character.birth_year.clone(),
            gender: new_character.gender.clone(),
            planet_id,
            created_at,
            updated_at,
        }
    }

    pub fn from_record(
        record: &CharacterRecord,
        planet_id: Option<String>,
        id: String,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name: record.name.clone(),
            height: record.height.clone(),
            mass: record.mass.clone(),
            hair_color: record.hair_color.clone(),
            skin_color: record.skin_color.clone(),
            eye_color: record.eye_color.clone(),
            birth_year: record.birth_year.clone(),
            gender: record.gender.clone(),
            planet_id,
            created_at,
            updated_at,
        }
    }
}

impl From<CharacterDB> for Character {
    fn from(row: CharacterDB) -> Self {
        Character {
            id: row.id,
            name: row.name,
            height: row.height,
            mass: row.mass,
            hair_color: row.hair_color,
            skin_color: row.skin_color,
            eye_color: row.eye_color,
            birth_year: row.birth_year,
            gender: row.gender,
            planet_id: row.planet_id,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::<Utc>::from_naive_utc_and_offset(row.updated_at, Utc),
        }
    }
}
