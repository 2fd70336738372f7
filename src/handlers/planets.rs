//! Planet handlers: list, get, add, update, delete.

use crate::error::AppError;
use crate::extractors::{EntityId, ValidJson};
use crate::models::{NewPlanet, Planet, PlanetChanges};
use crate::response;
use crate::service::PlanetService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(PlanetService::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Planet>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(PlanetService::get(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewPlanet>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::added(PlanetService::create(&state.pool, &body).await?))
}

pub async fn update(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Planet>,
    ValidJson(changes): ValidJson<PlanetChanges>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::updated(PlanetService::update(&state.pool, id, &changes).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Planet>,
) -> Result<impl IntoResponse, AppError> {
    PlanetService::delete(&state.pool, id).await?;
    Ok(response::deleted())
}
