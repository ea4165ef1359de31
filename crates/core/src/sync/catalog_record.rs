//! Wire records as served by the upstream catalog.
//!
//! Scalar fields are required so that a structurally broken payload fails the
//! run. Relational fields are lenient by design: a missing array decodes as
//! empty and `homeworld` may be null. Every record carries `url`, the stable
//! external identifier used to cross-link collections within one run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PlanetRecord {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesRecord {
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
    pub homeworld: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub species: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleRecord {
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
    #[serde(default)]
    pub pilots: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StarshipRecord {
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
    #[serde(rename = "MGLT")]
    pub mglt: String,
    pub starship_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmRecord {
    pub title: String,
    pub episode_id: i32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
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
    pub url: String,
}

/// All six collections of one run, fetched in dependency order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub planets: Vec<PlanetRecord>,
    pub species: Vec<SpeciesRecord>,
    pub characters: Vec<CharacterRecord>,
    pub vehicles: Vec<VehicleRecord>,
    pub starships: Vec<StarshipRecord>,
    pub films: Vec<FilmRecord>,
}

/// Per-collection import counts of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub planets: usize,
    pub species: usize,
    pub characters: usize,
    pub vehicles: usize,
    pub starships: usize,
    pub films: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_record_tolerates_null_homeworld_and_missing_species() {
        let json = r#"{
            "name": "Thomas Gav",
            "height": "180",
            "mass": "85",
            "hair_color": "Black",
            "skin_color": "Fair",
            "eye_color": "Brown",
            "birth_year": "1997",
            "gender": "Male",
            "homeworld": null,
            "url": "https://swapi.info/api/people/1/"
        }"#;

        let record: CharacterRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Thomas Gav");
        assert!(record.homeworld.is_none());
        assert!(record.species.is_empty());
    }

    #[test]
    fn starship_record_maps_upstream_mglt_casing() {
        let json = r#"{
            "name": "Amazing Starship",
            "model": "Latest Model 3",
            "manufacturer": "Ferrari",
            "cost_in_credits": "23000000",
            "length": "15",
            "max_atmosphering_speed": "1050",
            "crew": "25",
            "passengers": "30",
            "cargo_capacity": "110",
            "consumables": "1 week",
            "hyperdrive_rating": "1.0",
            "MGLT": "100",
            "starship_class": "Starfighter",
            "pilots": ["https://swapi.info/api/people/1/"],
            "url": "https://swapi.info/api/starships/1/"
        }"#;

        let record: StarshipRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.mglt, "100");
        assert_eq!(record.pilots.len(), 1);
    }

    #[test]
    fn film_record_defaults_missing_relation_arrays() {
        let json = r#"{
            "title": "New Star Wars Movie",
            "episode_id": 12,
            "opening_crawl": "In a galaxy far far away ......",
            "director": "Christopher Nolan",
            "producer": "Unknown",
            "release_date": "2026-05-19",
            "characters": ["https://swapi.info/api/people/1/"],
            "url": "https://swapi.info/api/films/1/"
        }"#;

        let record: FilmRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.episode_id, 12);
        assert_eq!(record.characters.len(), 1);
        assert!(record.planets.is_empty());
        assert!(record.starships.is_empty());
    }

    #[test]
    fn planet_record_requires_scalar_fields() {
        let json = r#"{ "name": "Tatooine", "url": "https://swapi.info/api/planets/1/" }"#;
        assert!(serde_json::from_str::<PlanetRecord>(json).is_err());
    }
}
