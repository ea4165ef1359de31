//! Orchestration of one catalog synchronization run.

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use crate::errors::{Error, Result};

use super::{
    CatalogSnapshot, CharacterRecord, FilmRecord, PlanetRecord, SpeciesRecord, StarshipRecord,
    SyncSummary, VehicleRecord,
};

/// Read access to the upstream catalog, one collection snapshot per call.
///
/// Implementations make a single attempt per call: no retries, no caching.
#[async_trait]
pub trait CatalogSourceTrait: Send + Sync {
    async fn fetch_planets(&self) -> Result<Vec<PlanetRecord>>;
    async fn fetch_species(&self) -> Result<Vec<SpeciesRecord>>;
    async fn fetch_characters(&self) -> Result<Vec<CharacterRecord>>;
    async fn fetch_vehicles(&self) -> Result<Vec<VehicleRecord>>;
    async fn fetch_starships(&self) -> Result<Vec<StarshipRecord>>;
    async fn fetch_films(&self) -> Result<Vec<FilmRecord>>;
}

/// Transactional persistence of one catalog snapshot.
#[async_trait]
pub trait SyncRepositoryTrait: Send + Sync {
    /// Apply the snapshot atomically: the six import stages run in
    /// dependency order inside one transaction, threading resolver maps
    /// between stages, or no visible change happens at all.
    async fn replace_catalog(&self, snapshot: CatalogSnapshot) -> Result<SyncSummary>;
}

/// Sequences one synchronization run: dependency-ordered collection fetches
/// followed by one atomic apply.
///
/// This is the sole point translating internal failures into the opaque
/// [`Error::SyncFailed`]; the concrete cause is logged, never forwarded.
pub struct SyncService {
    source: Arc<dyn CatalogSourceTrait>,
    repository: Arc<dyn SyncRepositoryTrait>,
}

impl SyncService {
    pub fn new(source: Arc<dyn CatalogSourceTrait>, repository: Arc<dyn SyncRepositoryTrait>) -> Self {
        Self { source, repository }
    }

    /// Run one synchronization against the upstream catalog.
    pub async fn run_sync(&self) -> Result<SyncSummary> {
        match self.run_pipeline().await {
            Ok(summary) => {
                info!(
                    "catalog sync complete: {} planets, {} species, {} characters, {} vehicles, {} starships, {} films",
                    summary.planets,
                    summary.species,
                    summary.characters,
                    summary.vehicles,
                    summary.starships,
                    summary.films
                );
                Ok(summary)
            }
            Err(err) => {
                error!("catalog sync failed: {err}");
                Err(Error::SyncFailed)
            }
        }
    }

    /// Collections are fetched strictly sequentially in dependency order:
    /// later stages resolve references against maps built from earlier ones,
    /// so reordering or parallelizing would break reference resolution.
    async fn run_pipeline(&self) -> Result<SyncSummary> {
        let planets = self.source.fetch_planets().await?;
        let species = self.source.fetch_species().await?;
        let characters = self.source.fetch_characters().await?;
        let vehicles = self.source.fetch_vehicles().await?;
        let starships = self.source.fetch_starships().await?;
        let films = self.source.fetch_films().await?;

        self.repository
            .replace_catalog(CatalogSnapshot {
                planets,
                species,
                characters,
                vehicles,
                starships,
                films,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubSource {
        fail_at: Option<&'static str>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl StubSource {
        fn failing_at(collection: &'static str) -> Self {
            Self {
                fail_at: Some(collection),
                ..Self::default()
            }
        }

        fn visit(&self, collection: &'static str) -> Result<()> {
            self.calls.lock().unwrap().push(collection);
            if self.fail_at == Some(collection) {
                return Err(SourceError::Status(500).into());
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogSourceTrait for StubSource {
        async fn fetch_planets(&self) -> Result<Vec<PlanetRecord>> {
            self.visit("planets")?;
            Ok(Vec::new())
        }

        async fn fetch_species(&self) -> Result<Vec<SpeciesRecord>> {
            self.visit("species")?;
            Ok(Vec::new())
        }

        async fn fetch_characters(&self) -> Result<Vec<CharacterRecord>> {
            self.visit("characters")?;
            Ok(Vec::new())
        }

        async fn fetch_vehicles(&self) -> Result<Vec<VehicleRecord>> {
            self.visit("vehicles")?;
            Ok(Vec::new())
        }

        async fn fetch_starships(&self) -> Result<Vec<StarshipRecord>> {
            self.visit("starships")?;
            Ok(Vec::new())
        }

        async fn fetch_films(&self) -> Result<Vec<FilmRecord>> {
            self.visit("films")?;
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct StubRepository {
        fail: bool,
        applied: Mutex<usize>,
    }

    #[async_trait]
    impl SyncRepositoryTrait for StubRepository {
        async fn replace_catalog(&self, _snapshot: CatalogSnapshot) -> Result<SyncSummary> {
            *self.applied.lock().unwrap() += 1;
            if self.fail {
                return Err(crate::errors::DatabaseError::Internal("disk full".into()).into());
            }
            Ok(SyncSummary {
                planets: 0,
                species: 0,
                characters: 0,
                vehicles: 0,
                starships: 0,
                films: 0,
            })
        }
    }

    #[tokio::test]
    async fn fetches_collections_in_dependency_order() {
        let source = Arc::new(StubSource::default());
        let repository = Arc::new(StubRepository::default());
        let service = SyncService::new(source.clone(), repository.clone());

        service.run_sync().await.unwrap();

        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["planets", "species", "characters", "vehicles", "starships", "films"]
        );
        assert_eq!(*repository.applied.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_is_opaque_and_skips_persistence() {
        let source = Arc::new(StubSource::failing_at("starships"));
        let repository = Arc::new(StubRepository::default());
        let service = SyncService::new(source.clone(), repository.clone());

        let err = service.run_sync().await.unwrap_err();

        assert!(matches!(err, Error::SyncFailed));
        assert_eq!(*repository.applied.lock().unwrap(), 0);
        // Nothing past the failing stage is fetched.
        assert_eq!(
            *source.calls.lock().unwrap(),
            vec!["planets", "species", "characters", "vehicles", "starships"]
        );
    }

    #[tokio::test]
    async fn persistence_failure_is_opaque() {
        let source = Arc::new(StubSource::default());
        let repository = Arc::new(StubRepository {
            fail: true,
            ..StubRepository::default()
        });
        let service = SyncService::new(source, repository);

        let err = service.run_sync().await.unwrap_err();
        assert!(matches!(err, Error::SyncFailed));
    }
}
