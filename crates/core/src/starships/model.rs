use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::characters::CharacterDetails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Starship {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for creating or fully replacing a starship. `pilots` carries
/// local character ids and replaces the stored association set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStarship {
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
    #[serde(default)]
    pub pilots: Vec<String>,
}

/// Starship with pilot details embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarshipDetails {
    #[serde(flatten)]
    pub starship: Starship,
    pub pilots: Vec<CharacterDetails>,
}
