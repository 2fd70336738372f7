//! Extract a numeric id from the single path parameter.

use crate::error::AppError;
use crate::models::{DbId, Entity};
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::marker::PhantomData;

/// Id of an `E` row. An integer too large for a key can never match a row and answers 404;
/// anything that is not an integer answers 400.
pub struct EntityId<E>(pub DbId, pub PhantomData<fn() -> E>);

#[async_trait]
impl<S, E> FromRequestParts<S> for EntityId<E>
where
    S: Send + Sync,
    E: Entity,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let id = parse_id(&raw, E::KIND)?;
        Ok(EntityId(id, PhantomData))
    }
}

fn parse_id(raw: &str, kind: &'static str) -> Result<DbId, AppError> {
    let digits = raw.strip_prefix(|c| c == '-' || c == '+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::BadRequest(format!("invalid id '{}'", raw)));
    }
    raw.parse::<DbId>().map_err(|_| AppError::NotFound(kind))
}
