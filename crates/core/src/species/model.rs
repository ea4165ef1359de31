use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::planets::Planet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
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
    /// Homeworld reference; nullified when the planet is deleted.
    pub planet_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for creating or fully replacing a species.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpecies {
    pub name: String,
    pub classification: String,
    pub designation: String,
    pub average_height: String,
    pub average_lifespan: String,
    pub hair_colors: String,
    pub skin_colors: String,
    pub eye_colors: String,
    pub language: String,
    #[serde(default)]
    pub planet_id: Option<String>,
}

/// Species with its homeworld embedded, the shape served by read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesDetails {
    #[serde(flatten)]
    pub species: Species,
    pub planet: Option<Planet>,
}
