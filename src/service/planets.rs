use super::crud;
use super::CharacterService;
use crate::error::AppError;
use crate::migration::PLANET_TABLE;
use crate::models::{DbId, NewPlanet, Planet, PlanetChanges};
use crate::serialize::{self, PlanetBody};
use sqlx::{PgConnection, PgPool};

/// Column list shared across queries.
const COLUMNS: &str = "id, name, climate, diameter, gravity, population, terrain";

pub struct PlanetService;

impl PlanetService {
    /// All planets ordered by id, each with its characters.
    pub async fn list(pool: &PgPool) -> Result<Vec<PlanetBody>, AppError> {
        let mut tx = crud::snapshot(pool).await?;
        let sql = format!("SELECT {COLUMNS} FROM {PLANET_TABLE} ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        let planets = sqlx::query_as::<_, Planet>(&sql).fetch_all(&mut *tx).await?;
        let ids: Vec<DbId> = planets.iter().map(|p| p.id).collect();
        let residents =
            serialize::group_by_planet(CharacterService::living_on(&mut tx, &ids).await?);
        tx.commit().await?;
        Ok(planets
            .into_iter()
            .map(|p| {
                let r = residents.get(&p.id).map(Vec::as_slice).unwrap_or(&[]);
                serialize::planet(p, r)
            })
            .collect())
    }

    async fn find(conn: &mut PgConnection, id: DbId) -> Result<Option<Planet>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {PLANET_TABLE} WHERE id = $1");
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?)
    }

    /// Planets with the given ids, in no particular order. Missing ids are skipped.
    pub async fn find_many(conn: &mut PgConnection, ids: &[DbId]) -> Result<Vec<Planet>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {COLUMNS} FROM {PLANET_TABLE} WHERE id = ANY($1)");
        tracing::debug!(sql = %sql, ids = ?ids, "query");
        Ok(sqlx::query_as::<_, Planet>(&sql)
            .bind(ids)
            .fetch_all(conn)
            .await?)
    }

    pub async fn get(pool: &PgPool, id: DbId) -> Result<PlanetBody, AppError> {
        let mut tx = crud::snapshot(pool).await?;
        let planet = Self::find(&mut tx, id).await?.ok_or(AppError::NotFound("Planet"))?;
        let body = Self::with_residents(&mut tx, planet).await?;
        tx.commit().await?;
        Ok(body)
    }

    pub async fn create(pool: &PgPool, input: &NewPlanet) -> Result<PlanetBody, AppError> {
        let sql = format!(
            "INSERT INTO {PLANET_TABLE} (name, climate, diameter, gravity, population, terrain) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let planet = sqlx::query_as::<_, Planet>(&sql)
            .bind(&input.name)
            .bind(&input.climate)
            .bind(&input.diameter)
            .bind(&input.gravity)
            .bind(&input.population)
            .bind(&input.terrain)
            .fetch_one(pool)
            .await?;
        tracing::info!(id = planet.id, name = %planet.name, "planet created");
        Ok(serialize::planet(planet, &[]))
    }

    /// Overwrite only the fields present in `changes`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &PlanetChanges,
    ) -> Result<PlanetBody, AppError> {
        let sql = format!(
            "UPDATE {PLANET_TABLE} SET \
                name = COALESCE($2, name), \
                climate = COALESCE($3, climate), \
                diameter = COALESCE($4, diameter), \
                gravity = COALESCE($5, gravity), \
                population = COALESCE($6, population), \
                terrain = COALESCE($7, terrain) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        let planet = sqlx::query_as::<_, Planet>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.climate)
            .bind(&changes.diameter)
            .bind(&changes.gravity)
            .bind(&changes.population)
            .bind(&changes.terrain)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("Planet"))?;
        tracing::info!(id, "planet updated");
        let mut tx = crud::snapshot(pool).await?;
        let body = Self::with_residents(&mut tx, planet).await?;
        tx.commit().await?;
        Ok(body)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::delete_by_id(pool, PLANET_TABLE, id, "Planet").await
    }

    pub async fn require(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::require(pool, PLANET_TABLE, id, "Planet").await
    }

    async fn with_residents(
        conn: &mut PgConnection,
        planet: Planet,
    ) -> Result<PlanetBody, AppError> {
        let residents = CharacterService::living_on(conn, &[planet.id]).await?;
        Ok(serialize::planet(planet, &residents))
    }
}
