use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use holocron_core::films::{FilmDetails, NewFilm};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", get(list).post(create))
        .route("/films/{id}", get(get_one).put(update).delete(delete_one))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<FilmDetails>>> {
    Ok(Json(state.films.list_films()?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FilmDetails>> {
    Ok(Json(state.films.get_film(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(new_film): Json<NewFilm>,
) -> ApiResult<(StatusCode, Json<FilmDetails>)> {
    let created = state.films.create_film(new_film).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NewFilm>,
) -> ApiResult<Json<FilmDetails>> {
    Ok(Json(state.films.update_film(&id, update).await?))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.films.delete_film(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
