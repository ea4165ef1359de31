//! Core domain types, repository contracts, and the catalog sync engine.

pub mod errors;

pub mod characters;
pub mod films;
pub mod planets;
pub mod species;
pub mod starships;
pub mod sync;
pub mod vehicles;

pub use errors::{Error, Result};
