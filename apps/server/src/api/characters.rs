use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use holocron_core::characters::{CharacterDetails, NewCharacter};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", get(list).post(create))
        .route(
            "/characters/{id}",
            get(get_one).put(update).delete(delete_one),
        )
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<CharacterDetails>>> {
    Ok(Json(state.characters.list_characters()?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CharacterDetails>> {
    Ok(Json(state.characters.get_character(&id)?))
}

async fn create(
    State(state): State<AppState>,
    Json(new_character): Json<NewCharacter>,
) -> ApiResult<(StatusCode, Json<CharacterDetails>)> {
    let created = state.characters.create_character(new_character).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<NewCharacter>,
) -> ApiResult<Json<CharacterDetails>> {
    Ok(Json(state.characters.update_character(&id, update).await?))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.characters.delete_character(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
