use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::planets::Planet;
use crate::species::SpeciesDetails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    /// Homeworld reference; nullified when the planet is deleted.
    pub planet_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for creating or fully replacing a character.
///
/// `species` carries local surrogate ids; the stored association set is
/// replaced with exactly this membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCharacter {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    #[serde(default)]
    pub planet_id: Option<String>,
    #[serde(default)]
    pub species: Vec<String>,
}

/// Character with homeworld and species embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDetails {
    #[serde(flatten)]
    pub character: Character,
    pub planet: Option<Planet>,
    pub species: Vec<SpeciesDetails>,
}
