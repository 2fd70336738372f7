//! Extract and validate a JSON request body.

use crate::error::AppError;
use crate::service::validation::Payload;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

/// JSON body checked against `T`'s field rules. Rejections become JSON errors: 413 for an
/// oversized body, 400 for everything else.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Payload,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
                _ => AppError::BadRequest(rejection.body_text()),
            })?;
        match value {
            Value::Object(map) => Ok(ValidJson(T::from_object(map)?)),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}
