use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use holocron_core::starships::{NewStarship, StarshipDetails};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/starships", get(list).post(create))
        .route(
            "/starships/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<StarshipDetails>>> {
    Ok(Json(state.starships.list_starships()?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StarshipDetails>> {
    Ok(Json(state.starships.get_starship(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(new_starship): Json<NewStarship>,
) -> ApiResult<(StatusCode, Json<StarshipDetails>)> {
    let created = state.starships.create_starship(new_starship).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NewStarship>,
) -> ApiResult<Json<StarshipDetails>> {
    Ok(Json(state.starships.update_starship(&id, update).await?))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.starships.delete_starship(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
