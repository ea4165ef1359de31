//! REST API surface: CRUD routes for the six catalog entities plus the
//! synchronization operation, all behind the capability check.

pub mod characters;
pub mod films;
pub mod planets;
pub mod species;
pub mod starships;
pub mod sync;
pub mod vehicles;

use axum::middleware;
use axum::Router;

use crate::auth::require_auth;
use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(planets::router())
        .merge(species::router())
        .merge(characters::router())
        .merge(vehicles::router())
        .merge(starships::router())
        .merge(films::router())
        .merge(sync::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api", routes).with_state(state)
}
