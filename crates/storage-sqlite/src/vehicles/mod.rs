//! Vehicle storage: database models and CRUD repository.

mod model;
mod repository;

pub use model::{VehicleDB, VehiclePilotDB};
pub use repository::VehicleRepository;

pub(crate) use repository::{load_vehicle_details, replace_vehicle_pilots};
