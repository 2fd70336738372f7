//! Response helpers: bare JSON for reads, a confirmation envelope for writes.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const ADDED: &str = "All good, added";
pub const UPDATED: &str = "All good, updated!";
pub const DELETED: &str = "All good, deleted";

/// Body of every successful create, update and delete.
#[derive(Serialize)]
pub struct Confirmation<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn added<T: Serialize>(data: T) -> (StatusCode, Json<Confirmation<T>>) {
    confirm(ADDED, Some(data))
}

pub fn updated<T: Serialize>(data: T) -> (StatusCode, Json<Confirmation<T>>) {
    confirm(UPDATED, Some(data))
}

pub fn deleted() -> (StatusCode, Json<Confirmation<()>>) {
    confirm(DELETED, None)
}

fn confirm<T: Serialize>(message: &'static str, data: Option<T>) -> (StatusCode, Json<Confirmation<T>>) {
    (StatusCode::OK, Json(Confirmation { message, data }))
}
