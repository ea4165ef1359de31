use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use holocron_core::vehicles::{NewVehicle, VehicleDetails};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list).post(create))
        .route("/vehicles/{id}", get(get_one).put(update).delete(delete_one))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<VehicleDetails>>> {
    Ok(Json(state.vehicles.list_vehicles()?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<VehicleDetails>> {
    Ok(Json(state.vehicles.get_vehicle(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(new_vehicle): Json<NewVehicle>,
) -> ApiResult<(StatusCode, Json<VehicleDetails>)> {
    let created = state.vehicles.create_vehicle(new_vehicle).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NewVehicle>,
) -> ApiResult<Json<VehicleDetails>> {
    Ok(Json(state.vehicles.update_vehicle(&id, update).await?))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.vehicles.delete_vehicle(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
