//! Film storage: database models and CRUD repository.

mod model;
mod repository;

pub use model::{
    FilmCharacterDB, FilmDB, FilmPlanetDB, FilmSpeciesDB, FilmStarshipDB, FilmVehicleDB,
};
pub use repository::FilmRepository;

pub(crate) use repository::{replace_film_associations, FilmAssociations};
