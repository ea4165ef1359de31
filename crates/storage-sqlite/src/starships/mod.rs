//! Starship storage: database models and CRUD repository.

mod model;
mod repository;

pub use model::{StarshipDB, StarshipPilotDB};
pub use repository::StarshipRepository;

pub(crate) use repository::{load_starship_details, replace_starship_pilots};
