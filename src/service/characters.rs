use super::crud;
use super::PlanetService;
use crate::error::AppError;
use crate::migration::CHARACTER_TABLE;
use crate::models::{Character, CharacterChanges, DbId, NewCharacter};
use sqlx::{PgConnection, PgPool};

/// Column list shared across queries.
const COLUMNS: &str =
    "id, name, birth_year, height, mass, hair_color, eye_color, gender, planet_id";

pub struct CharacterService;

impl CharacterService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Character>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {CHARACTER_TABLE} ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Character>(&sql).fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, id: DbId) -> Result<Character, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {CHARACTER_TABLE} WHERE id = $1");
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Character>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("Character"))
    }

    /// Characters with the given ids. Missing ids are skipped.
    pub async fn find_many(conn: &mut PgConnection, ids: &[DbId]) -> Result<Vec<Character>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {COLUMNS} FROM {CHARACTER_TABLE} WHERE id = ANY($1) ORDER BY id");
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        Ok(sqlx::query_as::<_, Character>(&sql)
            .bind(ids)
            .fetch_all(conn)
            .await?)
    }

    /// Characters whose homeworld is one of `planet_ids`, ordered by id.
    pub async fn living_on(
        conn: &mut PgConnection,
        planet_ids: &[DbId],
    ) -> Result<Vec<Character>, AppError> {
        if planet_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {COLUMNS} FROM {CHARACTER_TABLE} WHERE planet_id = ANY($1) ORDER BY id"
        );
        tracing::debug!(sql = %sql, planet_ids = ?planet_ids, "query");
        Ok(sqlx::query_as::<_, Character>(&sql)
            .bind(planet_ids)
            .fetch_all(conn)
            .await?)
    }

    pub async fn create(pool: &PgPool, input: &NewCharacter) -> Result<Character, AppError> {
        if let Some(planet_id) = input.planet_id {
            PlanetService::require(pool, planet_id).await?;
        }
        let sql = format!(
            "INSERT INTO {CHARACTER_TABLE} \
                (name, birth_year, height, mass, hair_color, eye_color, gender, planet_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let character = sqlx::query_as::<_, Character>(&sql)
            .bind(&input.name)
            .bind(&input.birth_year)
            .bind(&input.height)
            .bind(&input.mass)
            .bind(&input.hair_color)
            .bind(&input.eye_color)
            .bind(&input.gender)
            .bind(input.planet_id)
            .fetch_one(pool)
            .await?;
        tracing::info!(id = character.id, name = %character.name, "character created");
        Ok(character)
    }

    /// Overwrite only the fields present in `changes`. An explicit `planet_id: null` clears the homeworld.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &CharacterChanges,
    ) -> Result<Character, AppError> {
        crud::require(pool, CHARACTER_TABLE, id, "Character").await?;
        if let Some(Some(planet_id)) = changes.planet_id {
            PlanetService::require(pool, planet_id).await?;
        }
        let sql = format!(
            "UPDATE {CHARACTER_TABLE} SET \
                name = COALESCE($2, name), \
                birth_year = COALESCE($3, birth_year), \
                height = COALESCE($4, height), \
                mass = COALESCE($5, mass), \
                hair_color = COALESCE($6, hair_color), \
                eye_color = COALESCE($7, eye_color), \
                gender = COALESCE($8, gender), \
                planet_id = CASE WHEN $9::boolean THEN $10::integer ELSE planet_id END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        let character = sqlx::query_as::<_, Character>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.birth_year)
            .bind(&changes.height)
            .bind(&changes.mass)
            .bind(&changes.hair_color)
            .bind(&changes.eye_color)
            .bind(&changes.gender)
            .bind(changes.planet_id.is_some())
            .bind(changes.planet_id.flatten())
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("Character"))?;
        tracing::info!(id, "character updated");
        Ok(character)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::delete_by_id(pool, CHARACTER_TABLE, id, "Character").await
    }

    pub async fn require(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::require(pool, CHARACTER_TABLE, id, "Character").await
    }
}
