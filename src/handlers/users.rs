//! User handlers: list, get, add, update, delete.

use crate::error::AppError;
use crate::extractors::{EntityId, ValidJson};
use crate::models::{NewUser, User, UserChanges};
use crate::response;
use crate::service::UserService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(UserService::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<User>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(UserService::get(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::added(UserService::create(&state.pool, &body).await?))
}

pub async fn update(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<User>,
    ValidJson(changes): ValidJson<UserChanges>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::updated(UserService::update(&state.pool, id, &changes).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<User>,
) -> Result<impl IntoResponse, AppError> {
    UserService::delete(&state.pool, id).await?;
    Ok(response::deleted())
}
