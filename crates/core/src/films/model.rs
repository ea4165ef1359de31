use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::characters::CharacterDetails;
use crate::planets::Planet;
use crate::species::SpeciesDetails;
use crate::starships::StarshipDetails;
use crate::vehicles::VehicleDetails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: String,
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for creating or fully replacing a film. The five relation
/// lists carry local surrogate ids and replace the stored association sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilm {
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
}

/// Film with all five related collections embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDetails {
    #[serde(flatten)]
    pub film: Film,
    pub characters: Vec<CharacterDetails>,
    pub planets: Vec<Planet>,
    pub species: Vec<SpeciesDetails>,
    pub vehicles: Vec<VehicleDetails>,
    pub starships: Vec<StarshipDetails>,
}
