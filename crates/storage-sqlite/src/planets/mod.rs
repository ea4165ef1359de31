//! Planet storage: database model and CRUD repository.

mod model;
mod repository;

pub use model::PlanetDB;
pub use repository::PlanetRepository;
