//! Shared application state for all routes.

use sqlx::PgPool;

/// The pool is the only shared state; every handler borrows its connection from it.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState { pool }
    }
}
