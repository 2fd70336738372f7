//! Character handlers: list, get, add, update, delete.

use crate::error::AppError;
use crate::extractors::{EntityId, ValidJson};
use crate::models::{Character, CharacterChanges, NewCharacter};
use crate::response;
use crate::service::CharacterService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(CharacterService::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Character>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(CharacterService::get(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewCharacter>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::added(CharacterService::create(&state.pool, &body).await?))
}

pub async fn update(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Character>,
    ValidJson(changes): ValidJson<CharacterChanges>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::updated(CharacterService::update(&state.pool, id, &changes).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Character>,
) -> Result<impl IntoResponse, AppError> {
    CharacterService::delete(&state.pool, id).await?;
    Ok(response::deleted())
}
