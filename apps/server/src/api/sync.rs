use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
struct SyncResponse {
    message: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/sync", post(run_sync))
}

/// Run one catalog synchronization against the upstream source. The response
/// carries only the fixed message; per-collection counts go to the log.
async fn run_sync(State(state): State<AppState>) -> ApiResult<Json<SyncResponse>> {
    let summary = state.sync.run_sync().await?;
    info!(
        "sync imported {} planets, {} species, {} characters, {} vehicles, {} starships, {} films",
        summary.planets,
        summary.species,
        summary.characters,
        summary.vehicles,
        summary.starships,
        summary.films
    );
    Ok(Json(SyncResponse {
        message: "Star Wars data synced successfully!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    use holocron_core::errors::SourceError;
    use holocron_core::sync::{
        CatalogSourceTrait, CharacterRecord, FilmRecord, PlanetRecord, SpeciesRecord,
        StarshipRecord, SyncService, VehicleRecord,
    };
    use holocron_core::Result;
    use holocron_storage_sqlite::characters::CharacterRepository;
    use holocron_storage_sqlite::films::FilmRepository;
    use holocron_storage_sqlite::planets::PlanetRepository;
    use holocron_storage_sqlite::species::SpeciesRepository;
    use holocron_storage_sqlite::starships::StarshipRepository;
    use holocron_storage_sqlite::sync::SyncRepository;
    use holocron_storage_sqlite::vehicles::VehicleRepository;
    use holocron_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

    use crate::api::api_router;
    use crate::state::AppState;

    const API_TOKEN: &str = "test-token";
    const PILOT_URL: &str = "https://swapi.info/api/people/1/";
    const STARSHIP_URL: &str = "https://swapi.info/api/starships/1/";

    struct StubSource {
        fail_at: Option<&'static str>,
    }

    impl StubSource {
        fn check(&self, collection: &'static str) -> Result<()> {
            if self.fail_at == Some(collection) {
                return Err(SourceError::Status(400).into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogSourceTrait for StubSource {
        async fn fetch_planets(&self) -> Result<Vec<PlanetRecord>> {
            self.check("planets")?;
            Ok(Vec::new())
        }

        async fn fetch_species(&self) -> Result<Vec<SpeciesRecord>> {
            self.check("species")?;
            Ok(Vec::new())
        }

        async fn fetch_characters(&self) -> Result<Vec<CharacterRecord>> {
            self.check("characters")?;
            Ok(vec![CharacterRecord {
                name: "Thomas Gav".to_string(),
                height: "180".to_string(),
                mass: "85".to_string(),
                hair_color: "Black".to_string(),
                skin_color: "Fair".to_string(),
                eye_color: "Brown".to_string(),
                birth_year: "1997".to_string(),
                gender: "Male".to_string(),
                homeworld: None,
                species: Vec::new(),
                url: PILOT_URL.to_string(),
            }])
        }

        async fn fetch_vehicles(&self) -> Result<Vec<VehicleRecord>> {
            self.check("vehicles")?;
            Ok(Vec::new())
        }

        async fn fetch_starships(&self) -> Result<Vec<StarshipRecord>> {
            self.check("starships")?;
            Ok(vec![StarshipRecord {
                name: "Amazing Starship".to_string(),
                model: "Latest Model 3".to_string(),
                manufacturer: "Ferrari".to_string(),
                cost_in_credits: "23000000".to_string(),
                length: "15".to_string(),
                max_atmosphering_speed: "1050".to_string(),
                crew: "25".to_string(),
                passengers: "30".to_string(),
                cargo_capacity: "110".to_string(),
                consumables: "1 week".to_string(),
                hyperdrive_rating: "1.0".to_string(),
                mglt: "100".to_string(),
                starship_class: "Starfighter".to_string(),
                pilots: vec![PILOT_URL.to_string()],
                url: STARSHIP_URL.to_string(),
            }])
        }

        async fn fetch_films(&self) -> Result<Vec<FilmRecord>> {
            self.check("films")?;
            Ok(vec![FilmRecord {
                title: "New Star Wars Movie".to_string(),
                episode_id: 12,
                opening_crawl: "In a galaxy far far away ......".to_string(),
                director: "Christopher Nolan".to_string(),
                producer: "Unknown".to_string(),
                release_date: "2026-05-19".to_string(),
                characters: vec![PILOT_URL.to_string()],
                planets: Vec::new(),
                species: Vec::new(),
                vehicles: Vec::new(),
                starships: vec![STARSHIP_URL.to_string()],
                url: "https://swapi.info/api/films/1/".to_string(),
            }])
        }
    }

    fn test_state(fail_at: Option<&'static str>) -> AppState {
        let app_data = tempdir()
            .expect("tempdir")
            .keep()
            .to_string_lossy()
            .to_string();
        let db_path = init(&app_data).expect("init db");
        run_migrations(&db_path).expect("migrate db");
        let pool = create_pool(&db_path).expect("create pool");
        let writer = spawn_writer(pool.as_ref().clone());

        let sync = Arc::new(SyncService::new(
            Arc::new(StubSource { fail_at }),
            Arc::new(SyncRepository::new(writer.clone())),
        ));

        AppState {
            planets: Arc::new(PlanetRepository::new(pool.clone(), writer.clone())),
            species: Arc::new(SpeciesRepository::new(pool.clone(), writer.clone())),
            characters: Arc::new(CharacterRepository::new(pool.clone(), writer.clone())),
            vehicles: Arc::new(VehicleRepository::new(pool.clone(), writer.clone())),
            starships: Arc::new(StarshipRepository::new(pool.clone(), writer.clone())),
            films: Arc::new(FilmRepository::new(pool, writer)),
            sync,
            api_token: API_TOKEN.to_string(),
        }
    }

    fn sync_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/sync");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn sync_succeeds_and_populates_the_store() {
        let state = test_state(None);
        let app = api_router(state.clone());

        let response = app.oneshot(sync_request(Some(API_TOKEN))).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Star Wars data synced successfully!");

        assert_eq!(state.characters.list_characters().expect("characters").len(), 1);
        assert_eq!(state.starships.list_starships().expect("starships").len(), 1);
        assert_eq!(state.films.list_films().expect("films").len(), 1);
    }

    #[tokio::test]
    async fn failed_sync_returns_fixed_message_and_writes_nothing() {
        let state = test_state(Some("starships"));
        let app = api_router(state.clone());

        let response = app.oneshot(sync_request(Some(API_TOKEN))).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Syncing of data from SWAPI has failed!");

        assert!(state.characters.list_characters().expect("characters").is_empty());
        assert!(state.starships.list_starships().expect("starships").is_empty());
        assert!(state.films.list_films().expect("films").is_empty());
    }

    #[tokio::test]
    async fn sync_requires_the_capability_token() {
        let state = test_state(None);
        let app = api_router(state.clone());

        let response = app.oneshot(sync_request(None)).await.expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(state.characters.list_characters().expect("characters").is_empty());

        let app = api_router(state.clone());
        let response = app
            .oneshot(sync_request(Some("wrong-token")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
