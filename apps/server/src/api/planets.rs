use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use holocron_core::planets::{NewPlanet, Planet};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/planets", get(list).post(create))
        .route("/planets/{id}", get(get_one).put(update).delete(delete_one))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Planet>>> {
    Ok(Json(state.planets.list_planets()?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Planet>> {
    Ok(Json(state.planets.get_planet(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(new_planet): Json<NewPlanet>,
) -> ApiResult<(StatusCode, Json<Planet>)> {
    let created = state.planets.create_planet(new_planet).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NewPlanet>,
) -> ApiResult<Json<Planet>> {
    Ok(Json(state.planets.update_planet(&id, update).await?))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.planets.delete_planet(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
