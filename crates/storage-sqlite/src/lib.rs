//! SQLite persistence for the Holocron catalog: schema, embedded migrations,
//! connection pool, the writer actor, and per-entity repositories.

pub mod db;
pub mod errors;
pub mod schema;

pub mod characters;
pub mod films;
pub mod planets;
pub mod species;
pub mod starships;
pub mod sync;
pub mod vehicles;

pub use db::{create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle};
