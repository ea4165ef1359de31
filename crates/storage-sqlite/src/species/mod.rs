//! Species storage: database model and CRUD repository.

mod model;
mod repository;

pub use model::SpeciesDB;
pub use repository::SpeciesRepository;

pub(crate) use repository::load_species_details;
