//! Favorite handlers, including the per-user favorites routes.

use crate::error::AppError;
use crate::extractors::{EntityId, ValidJson};
use crate::models::{Favorite, FavoriteChanges, NewFavorite, NewUserFavorite, User};
use crate::response;
use crate::service::FavoriteService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(FavoriteService::list(&state.pool).await?))
}

pub async fn read(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Favorite>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(FavoriteService::get(&state.pool, id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NewFavorite>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::added(FavoriteService::create(&state.pool, &body).await?))
}

pub async fn update(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Favorite>,
    ValidJson(changes): ValidJson<FavoriteChanges>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::updated(FavoriteService::update(&state.pool, id, &changes).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    EntityId(id, _): EntityId<Favorite>,
) -> Result<impl IntoResponse, AppError> {
    FavoriteService::delete(&state.pool, id).await?;
    Ok(response::deleted())
}

/// GET /users/:id/favorites
pub async fn list_for_user(
    State(state): State<AppState>,
    EntityId(user_id, _): EntityId<User>,
) -> Result<impl IntoResponse, AppError> {
    Ok(response::ok(FavoriteService::list_for_user(&state.pool, user_id).await?))
}

/// POST /users/:id/favorites
pub async fn create_for_user(
    State(state): State<AppState>,
    EntityId(user_id, _): EntityId<User>,
    ValidJson(body): ValidJson<NewUserFavorite>,
) -> Result<impl IntoResponse, AppError> {
    let input = body.for_user(user_id);
    Ok(response::added(FavoriteService::create(&state.pool, &input).await?))
}
