use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use holocron_core::species::{NewSpecies, SpeciesDetails};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/species", get(list).post(create))
        .route("/species/{id}", get(get_one).put(update).delete(delete_one))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<SpeciesDetails>>> {
    Ok(Json(state.species.list_species()?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SpeciesDetails>> {
    Ok(Json(state.species.get_species(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(new_species): Json<NewSpecies>,
) -> ApiResult<(StatusCode, Json<SpeciesDetails>)> {
    let created = state.species.create_species(new_species).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NewSpecies>,
) -> ApiResult<Json<SpeciesDetails>> {
    Ok(Json(state.species.update_species(&id, update).await?))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.species.delete_species(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
