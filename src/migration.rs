//! Schema DDL for the four catalog tables.
//! Order follows foreign-key dependencies: user and planet first, then character, then favorite.

use crate::error::AppError;
use sqlx::PgPool;

/// Longest value accepted by every text column.
pub const TEXT_MAX_LEN: usize = 50;

pub const USER_TABLE: &str = "\"user\"";
pub const PLANET_TABLE: &str = "planet";
pub const CHARACTER_TABLE: &str = "\"character\"";
pub const FAVORITE_TABLE: &str = "favorite";

fn statements() -> Vec<String> {
    let text = format!("VARCHAR({}) NOT NULL", TEXT_MAX_LEN);
    vec![
        format!(
            "CREATE TABLE IF NOT EXISTS {USER_TABLE} (
                id SERIAL PRIMARY KEY,
                name {text},
                username {text},
                password {text}
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {PLANET_TABLE} (
                id SERIAL PRIMARY KEY,
                name {text},
                climate {text},
                diameter {text},
                gravity {text},
                population {text},
                terrain {text}
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {CHARACTER_TABLE} (
                id SERIAL PRIMARY KEY,
                name {text},
                birth_year {text},
                height {text},
                mass {text},
                hair_color {text},
                eye_color {text},
                gender {text},
                planet_id INTEGER REFERENCES {PLANET_TABLE} (id) ON DELETE SET NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS {FAVORITE_TABLE} (
                id SERIAL PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES {USER_TABLE} (id) ON DELETE CASCADE,
                planet_id INTEGER NOT NULL REFERENCES {PLANET_TABLE} (id) ON DELETE CASCADE,
                character_id INTEGER NOT NULL REFERENCES {CHARACTER_TABLE} (id) ON DELETE CASCADE
            )"
        ),
        format!("CREATE INDEX IF NOT EXISTS character_planet_id_idx ON {CHARACTER_TABLE} (planet_id)"),
        format!("CREATE INDEX IF NOT EXISTS favorite_user_id_idx ON {FAVORITE_TABLE} (user_id)"),
    ]
}

/// Create all tables and indexes. Idempotent: safe to run on every startup.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for sql in statements() {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!("schema up to date");
    Ok(())
}
