use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use tempfile::tempdir;

use holocron_core::errors::SourceError;
use holocron_core::sync::{
    CatalogSnapshot, CatalogSourceTrait, CharacterRecord, FilmRecord, PlanetRecord, SpeciesRecord,
    StarshipRecord, SyncRepositoryTrait, SyncService, VehicleRecord,
};
use holocron_core::{Error, Result};

use crate::db::{create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle};
use crate::schema::{
    character_species, characters, films, planets, species, starship_pilots, starships, vehicles,
};

use super::SyncRepository;

fn setup() -> (Arc<DbPool>, WriteHandle) {
    let app_data = tempdir()
        .expect("tempdir")
        .keep()
        .to_string_lossy()
        .to_string();
    let db_path = init(&app_data).expect("init db");
    run_migrations(&db_path).expect("migrate db");
    let pool = create_pool(&db_path).expect("create pool");
    let writer = spawn_writer(pool.as_ref().clone());
    (pool, writer)
}

fn planet_record(name: &str, url: &str) -> PlanetRecord {
    PlanetRecord {
        name: name.to_string(),
        rotation_period: "23".to_string(),
        orbital_period: "304".to_string(),
        diameter: "10465".to_string(),
        climate: "arid".to_string(),
        gravity: "1 standard".to_string(),
        terrain: "desert".to_string(),
        surface_water: "1".to_string(),
        population: "200000".to_string(),
        url: url.to_string(),
    }
}

fn species_record(name: &str, url: &str, homeworld: Option<&str>) -> SpeciesRecord {
    SpeciesRecord {
        name: name.to_string(),
        classification: "mammal".to_string(),
        designation: "sentient".to_string(),
        average_height: "180".to_string(),
        average_lifespan: "120".to_string(),
        hair_colors: "black, brown".to_string(),
        skin_colors: "fair".to_string(),
        eye_colors: "brown".to_string(),
        language: "Galactic Basic".to_string(),
        homeworld: homeworld.map(str::to_string),
        url: url.to_string(),
    }
}

fn character_record(
    name: &str,
    url: &str,
    homeworld: Option<&str>,
    species: &[&str],
) -> CharacterRecord {
    CharacterRecord {
        name: name.to_string(),
        height: "172".to_string(),
        mass: "77".to_string(),
        hair_color: "blond".to_string(),
        skin_color: "fair".to_string(),
        eye_color: "blue".to_string(),
        birth_year: "19BBY".to_string(),
        gender: "male".to_string(),
        homeworld: homeworld.map(str::to_string),
        species: species.iter().map(|s| s.to_string()).collect(),
        url: url.to_string(),
    }
}

fn vehicle_record(name: &str, url: &str, pilots: &[&str]) -> VehicleRecord {
    VehicleRecord {
        name: name.to_string(),
        model: "Digger Crawler".to_string(),
        manufacturer: "Corellia Mining Corporation".to_string(),
        cost_in_credits: "150000".to_string(),
        length: "36.8".to_string(),
        max_atmosphering_speed: "30".to_string(),
        crew: "46".to_string(),
        passengers: "30".to_string(),
        cargo_capacity: "50000".to_string(),
        consumables: "2 months".to_string(),
        vehicle_class: "wheeled".to_string(),
        pilots: pilots.iter().map(|p| p.to_string()).collect(),
        url: url.to_string(),
    }
}

fn starship_record(name: &str, url: &str, pilots: &[&str]) -> StarshipRecord {
    StarshipRecord {
        name: name.to_string(),
        model: "T-65 X-wing".to_string(),
        manufacturer: "Incom Corporation".to_string(),
        cost_in_credits: "149999".to_string(),
        length: "12.5".to_string(),
        max_atmosphering_speed: "1050".to_string(),
        crew: "1".to_string(),
        passengers: "0".to_string(),
        cargo_capacity: "110".to_string(),
        consumables: "1 week".to_string(),
        hyperdrive_rating: "1.0".to_string(),
        mglt: "100".to_string(),
        starship_class: "Starfighter".to_string(),
        pilots: pilots.iter().map(|p| p.to_string()).collect(),
        url: url.to_string(),
    }
}

fn film_record(title: &str, url: &str, characters: &[&str], starships: &[&str]) -> FilmRecord {
    FilmRecord {
        title: title.to_string(),
        episode_id: 4,
        opening_crawl: "It is a period of civil war.".to_string(),
        director: "George Lucas".to_string(),
        producer: "Gary Kurtz, Rick McCallum".to_string(),
        release_date: "1977-05-25".to_string(),
        characters: characters.iter().map(|c| c.to_string()).collect(),
        planets: Vec::new(),
        species: Vec::new(),
        vehicles: Vec::new(),
        starships: starships.iter().map(|s| s.to_string()).collect(),
        url: url.to_string(),
    }
}

fn count_rows(pool: &Arc<DbPool>) -> (i64, i64, i64, i64, i64, i64) {
    let mut conn = get_connection(pool).expect("conn");
    let planets: i64 = planets::table
        .select(count_star())
        .first(&mut conn)
        .expect("count");
    let species: i64 = species::table
        .select(count_star())
        .first(&mut conn)
        .expect("count");
    let characters: i64 = characters::table
        .select(count_star())
        .first(&mut conn)
        .expect("count");
    let vehicles: i64 = vehicles::table
        .select(count_star())
        .first(&mut conn)
        .expect("count");
    let starships: i64 = starships::table
        .select(count_star())
        .first(&mut conn)
        .expect("count");
    let films: i64 = films::table
        .select(count_star())
        .first(&mut conn)
        .expect("count");
    (planets, species, characters, vehicles, starships, films)
}

fn starship_pilot_names(pool: &Arc<DbPool>, starship_name: &str) -> Vec<String> {
    let mut conn = get_connection(pool).expect("conn");
    let ship_id: String = starships::table
        .filter(starships::name.eq(starship_name))
        .select(starships::id)
        .first(&mut conn)
        .expect("starship");
    let pilot_ids: Vec<String> = starship_pilots::table
        .filter(starship_pilots::starship_id.eq(&ship_id))
        .select(starship_pilots::character_id)
        .load(&mut conn)
        .expect("pilots");
    let mut names: Vec<String> = characters::table
        .filter(characters::id.eq_any(&pilot_ids))
        .select(characters::name)
        .load(&mut conn)
        .expect("names");
    names.sort();
    names
}

const TATOOINE_URL: &str = "https://swapi.info/api/planets/1/";
const HUMAN_URL: &str = "https://swapi.info/api/species/1/";
const LUKE_URL: &str = "https://swapi.info/api/people/1/";
const BIGGS_URL: &str = "https://swapi.info/api/people/2/";
const WEDGE_URL: &str = "https://swapi.info/api/people/3/";
const XWING_URL: &str = "https://swapi.info/api/starships/1/";

fn tatooine_snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        planets: vec![planet_record("Tatooine", TATOOINE_URL)],
        species: vec![species_record("Human", HUMAN_URL, Some(TATOOINE_URL))],
        characters: vec![character_record(
            "Luke Skywalker",
            LUKE_URL,
            Some(TATOOINE_URL),
            &[HUMAN_URL],
        )],
        ..CatalogSnapshot::default()
    }
}

#[tokio::test]
async fn tatooine_scenario_links_homeworld_and_species() {
    let (pool, writer) = setup();
    let repo = SyncRepository::new(writer);

    let summary = repo.replace_catalog(tatooine_snapshot()).await.expect("sync");
    assert_eq!(summary.planets, 1);
    assert_eq!(summary.species, 1);
    assert_eq!(summary.characters, 1);

    let mut conn = get_connection(&pool).expect("conn");
    let planet_id: String = planets::table
        .select(planets::id)
        .first(&mut conn)
        .expect("planet");
    let species_planet: Option<String> = species::table
        .select(species::planet_id)
        .first(&mut conn)
        .expect("species");
    let character_planet: Option<String> = characters::table
        .select(characters::planet_id)
        .first(&mut conn)
        .expect("character");
    let link_count: i64 = character_species::table
        .select(count_star())
        .first(&mut conn)
        .expect("links");

    assert_eq!(species_planet.as_deref(), Some(planet_id.as_str()));
    assert_eq!(character_planet.as_deref(), Some(planet_id.as_str()));
    assert_eq!(link_count, 1);
}

#[tokio::test]
async fn resync_of_unchanged_snapshot_is_a_content_noop() {
    let (pool, writer) = setup();
    let repo = SyncRepository::new(writer);

    let snapshot = CatalogSnapshot {
        starships: vec![starship_record("X-wing", XWING_URL, &[LUKE_URL])],
        films: vec![film_record(
            "A New Hope",
            "https://swapi.info/api/films/1/",
            &[LUKE_URL],
            &[XWING_URL],
        )],
        ..tatooine_snapshot()
    };

    repo.replace_catalog(snapshot.clone()).await.expect("first sync");
    let first_ids: Vec<String> = {
        let mut conn = get_connection(&pool).expect("conn");
        characters::table
            .select(characters::id)
            .load(&mut conn)
            .expect("ids")
    };

    repo.replace_catalog(snapshot).await.expect("second sync");

    assert_eq!(count_rows(&pool), (1, 1, 1, 0, 1, 1));
    let mut conn = get_connection(&pool).expect("conn");
    let second_ids: Vec<String> = characters::table
        .select(characters::id)
        .load(&mut conn)
        .expect("ids");
    assert_eq!(first_ids, second_ids);
    let link_count: i64 = character_species::table
        .select(count_star())
        .first(&mut conn)
        .expect("links");
    assert_eq!(link_count, 1);
    assert_eq!(starship_pilot_names(&pool, "X-wing"), vec!["Luke Skywalker"]);
}

#[tokio::test]
async fn scalar_change_updates_the_row_in_place() {
    let (pool, writer) = setup();
    let repo = SyncRepository::new(writer);

    repo.replace_catalog(tatooine_snapshot()).await.expect("first sync");

    let mut changed = tatooine_snapshot();
    changed.characters[0].mass = "80".to_string();
    repo.replace_catalog(changed).await.expect("second sync");

    let mut conn = get_connection(&pool).expect("conn");
    let rows: Vec<(String, String)> = characters::table
        .select((characters::name, characters::mass))
        .load(&mut conn)
        .expect("rows");
    assert_eq!(rows, vec![("Luke Skywalker".to_string(), "80".to_string())]);
}

#[tokio::test]
async fn pilot_set_is_replaced_not_merged() {
    let (pool, writer) = setup();
    let repo = SyncRepository::new(writer);

    let first = CatalogSnapshot {
        characters: vec![
            character_record("Luke Skywalker", LUKE_URL, None, &[]),
            character_record("Biggs Darklighter", BIGGS_URL, None, &[]),
            character_record("Wedge Antilles", WEDGE_URL, None, &[]),
        ],
        starships: vec![starship_record("X-wing", XWING_URL, &[LUKE_URL, BIGGS_URL])],
        ..CatalogSnapshot::default()
    };
    repo.replace_catalog(first.clone()).await.expect("first sync");
    assert_eq!(
        starship_pilot_names(&pool, "X-wing"),
        vec!["Biggs Darklighter", "Luke Skywalker"]
    );

    let second = CatalogSnapshot {
        starships: vec![starship_record("X-wing", XWING_URL, &[BIGGS_URL, WEDGE_URL])],
        ..first
    };
    repo.replace_catalog(second).await.expect("second sync");

    assert_eq!(
        starship_pilot_names(&pool, "X-wing"),
        vec!["Biggs Darklighter", "Wedge Antilles"]
    );
}

#[tokio::test]
async fn unresolved_references_are_silently_dropped() {
    let (pool, writer) = setup();
    let repo = SyncRepository::new(writer);

    let snapshot = CatalogSnapshot {
        species: vec![species_record(
            "Human",
            HUMAN_URL,
            Some("https://swapi.info/api/planets/999/"),
        )],
        characters: vec![character_record(
            "Luke Skywalker",
            LUKE_URL,
            Some("https://swapi.info/api/planets/999/"),
            &["https://swapi.info/api/species/999/"],
        )],
        // One resolvable pilot listed twice plus one unknown: exactly one link.
        starships: vec![starship_record(
            "X-wing",
            XWING_URL,
            &[LUKE_URL, LUKE_URL, "https://swapi.info/api/people/999/"],
        )],
        ..CatalogSnapshot::default()
    };

    repo.replace_catalog(snapshot).await.expect("sync");

    let mut conn = get_connection(&pool).expect("conn");
    let species_planet: Option<String> = species::table
        .select(species::planet_id)
        .first(&mut conn)
        .expect("species");
    let character_planet: Option<String> = characters::table
        .select(characters::planet_id)
        .first(&mut conn)
        .expect("character");
    let species_links: i64 = character_species::table
        .select(count_star())
        .first(&mut conn)
        .expect("links");

    assert!(species_planet.is_none());
    assert!(character_planet.is_none());
    assert_eq!(species_links, 0);
    assert_eq!(starship_pilot_names(&pool, "X-wing"), vec!["Luke Skywalker"]);
}

struct StubSource {
    fail_at: Option<&'static str>,
}

impl StubSource {
    fn check(&self, collection: &'static str) -> Result<()> {
        if self.fail_at == Some(collection) {
            return Err(SourceError::Status(502).into());
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSourceTrait for StubSource {
    async fn fetch_planets(&self) -> Result<Vec<PlanetRecord>> {
        self.check("planets")?;
        Ok(vec![planet_record("Tatooine", TATOOINE_URL)])
    }

    async fn fetch_species(&self) -> Result<Vec<SpeciesRecord>> {
        self.check("species")?;
        Ok(vec![species_record("Human", HUMAN_URL, Some(TATOOINE_URL))])
    }

    async fn fetch_characters(&self) -> Result<Vec<CharacterRecord>> {
        self.check("characters")?;
        Ok(vec![character_record(
            "Luke Skywalker",
            LUKE_URL,
            Some(TATOOINE_URL),
            &[HUMAN_URL],
        )])
    }

    async fn fetch_vehicles(&self) -> Result<Vec<VehicleRecord>> {
        self.check("vehicles")?;
        Ok(vec![vehicle_record(
            "Sand Crawler",
            "https://swapi.info/api/vehicles/4/",
            &[],
        )])
    }

    async fn fetch_starships(&self) -> Result<Vec<StarshipRecord>> {
        self.check("starships")?;
        Ok(vec![starship_record("X-wing", XWING_URL, &[LUKE_URL])])
    }

    async fn fetch_films(&self) -> Result<Vec<FilmRecord>> {
        self.check("films")?;
        Ok(vec![film_record(
            "A New Hope",
            "https://swapi.info/api/films/1/",
            &[LUKE_URL],
            &[XWING_URL],
        )])
    }
}

#[tokio::test]
async fn failed_starship_fetch_leaves_every_table_empty() {
    let (pool, writer) = setup();
    let service = SyncService::new(
        Arc::new(StubSource {
            fail_at: Some("starships"),
        }),
        Arc::new(SyncRepository::new(writer)),
    );

    let err = service.run_sync().await.unwrap_err();
    assert!(matches!(err, Error::SyncFailed));
    assert_eq!(count_rows(&pool), (0, 0, 0, 0, 0, 0));
}

#[tokio::test]
async fn successful_run_populates_all_collections() {
    let (pool, writer) = setup();
    let service = SyncService::new(
        Arc::new(StubSource { fail_at: None }),
        Arc::new(SyncRepository::new(writer)),
    );

    let summary = service.run_sync().await.expect("sync");
    assert_eq!(summary.films, 1);
    assert_eq!(count_rows(&pool), (1, 1, 1, 1, 1, 1));
}

#[tokio::test]
async fn malformed_film_date_rolls_back_the_whole_run() {
    let (pool, writer) = setup();
    let repo = SyncRepository::new(writer);

    let mut snapshot = tatooine_snapshot();
    snapshot.films = vec![FilmRecord {
        release_date: "not-a-date".to_string(),
        ..film_record("A New Hope", "https://swapi.info/api/films/1/", &[], &[])
    }];

    let err = repo.replace_catalog(snapshot).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    // Planets, species, and characters were written before the failing stage
    // and must be gone again.
    assert_eq!(count_rows(&pool), (0, 0, 0, 0, 0, 0));
}
