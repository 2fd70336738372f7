use super::{crud, CharacterService, PlanetService, UserService};
use crate::error::AppError;
use crate::migration::{FAVORITE_TABLE, USER_TABLE};
use crate::models::{DbId, Favorite, FavoriteChanges, NewFavorite};
use crate::serialize::{self, FavoriteBody, Related};
use sqlx::{PgConnection, PgPool};
use std::collections::BTreeSet;

/// Column list shared across queries.
const COLUMNS: &str = "id, user_id, planet_id, character_id";

pub struct FavoriteService;

impl FavoriteService {
    pub async fn list(pool: &PgPool) -> Result<Vec<FavoriteBody>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {FAVORITE_TABLE} ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        let mut tx = crud::snapshot(pool).await?;
        let favorites = sqlx::query_as::<_, Favorite>(&sql).fetch_all(&mut *tx).await?;
        let bodies = Self::serialize_all(&mut tx, favorites).await?;
        tx.commit().await?;
        Ok(bodies)
    }

    pub async fn get(pool: &PgPool, id: DbId) -> Result<FavoriteBody, AppError> {
        let mut tx = crud::snapshot(pool).await?;
        let favorite = Self::find(&mut tx, id).await?.ok_or(AppError::NotFound("Favorite"))?;
        let body = Self::serialize_one(&mut tx, favorite).await?;
        tx.commit().await?;
        Ok(body)
    }

    /// Raw favorite rows owned by any of `user_ids`, ordered by id.
    pub async fn owned_by(conn: &mut PgConnection, user_ids: &[DbId]) -> Result<Vec<Favorite>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {COLUMNS} FROM {FAVORITE_TABLE} WHERE user_id = ANY($1) ORDER BY id");
        tracing::debug!(sql = %sql, user_ids = ?user_ids, "query");
        Ok(sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_ids)
            .fetch_all(conn)
            .await?)
    }

    /// Favorites of one user. Fails with NotFound when the user does not exist.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<FavoriteBody>, AppError> {
        let mut tx = crud::snapshot(pool).await?;
        if !crud::exists(&mut *tx, USER_TABLE, user_id).await? {
            return Err(AppError::NotFound("User"));
        }
        let favorites = Self::owned_by(&mut tx, &[user_id]).await?;
        let bodies = Self::serialize_all(&mut tx, favorites).await?;
        tx.commit().await?;
        Ok(bodies)
    }

    /// Insert after checking that the user, planet and character all exist. The insert holds
    /// key-share locks on the referenced rows until commit, so the response can always resolve them.
    pub async fn create(pool: &PgPool, input: &NewFavorite) -> Result<FavoriteBody, AppError> {
        UserService::require(pool, input.user_id).await?;
        PlanetService::require(pool, input.planet_id).await?;
        CharacterService::require(pool, input.character_id).await?;
        let sql = format!(
            "INSERT INTO {FAVORITE_TABLE} (user_id, planet_id, character_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let mut tx = pool.begin().await?;
        let favorite = sqlx::query_as::<_, Favorite>(&sql)
            .bind(input.user_id)
            .bind(input.planet_id)
            .bind(input.character_id)
            .fetch_one(&mut *tx)
            .await?;
        let body = Self::serialize_one(&mut tx, favorite).await?;
        tx.commit().await?;
        tracing::info!(id = body.favorite.id, user_id = body.favorite.user_id, "favorite created");
        Ok(body)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &FavoriteChanges,
    ) -> Result<FavoriteBody, AppError> {
        crud::require(pool, FAVORITE_TABLE, id, "Favorite").await?;
        if let Some(user_id) = changes.user_id {
            UserService::require(pool, user_id).await?;
        }
        if let Some(planet_id) = changes.planet_id {
            PlanetService::require(pool, planet_id).await?;
        }
        if let Some(character_id) = changes.character_id {
            CharacterService::require(pool, character_id).await?;
        }
        let sql = format!(
            "UPDATE {FAVORITE_TABLE} SET \
                user_id = COALESCE($2, user_id), \
                planet_id = COALESCE($3, planet_id), \
                character_id = COALESCE($4, character_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        let mut tx = pool.begin().await?;
        let favorite = sqlx::query_as::<_, Favorite>(&sql)
            .bind(id)
            .bind(changes.user_id)
            .bind(changes.planet_id)
            .bind(changes.character_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("Favorite"))?;
        let body = Self::serialize_one(&mut tx, favorite).await?;
        tx.commit().await?;
        tracing::info!(id, "favorite updated");
        Ok(body)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::delete_by_id(pool, FAVORITE_TABLE, id, "Favorite").await
    }

    async fn find(conn: &mut PgConnection, id: DbId) -> Result<Option<Favorite>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {FAVORITE_TABLE} WHERE id = $1");
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Favorite>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?)
    }

    /// Batch-load every planet, character and resident the favorites point at.
    pub async fn load_related(
        conn: &mut PgConnection,
        favorites: &[Favorite],
    ) -> Result<Related, AppError> {
        let planet_ids: Vec<DbId> = favorites
            .iter()
            .map(|f| f.planet_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let character_ids: Vec<DbId> = favorites
            .iter()
            .map(|f| f.character_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let planets = PlanetService::find_many(&mut *conn, &planet_ids).await?;
        let characters = CharacterService::find_many(&mut *conn, &character_ids).await?;
        let residents = CharacterService::living_on(conn, &planet_ids).await?;
        Ok(Related {
            planets: planets.into_iter().map(|p| (p.id, p)).collect(),
            characters: characters.into_iter().map(|c| (c.id, c)).collect(),
            residents: serialize::group_by_planet(residents),
        })
    }

    async fn serialize_all(
        conn: &mut PgConnection,
        favorites: Vec<Favorite>,
    ) -> Result<Vec<FavoriteBody>, AppError> {
        let related = Self::load_related(conn, &favorites).await?;
        favorites
            .into_iter()
            .map(|f| serialize::favorite(f, &related))
            .collect()
    }

    async fn serialize_one(
        conn: &mut PgConnection,
        favorite: Favorite,
    ) -> Result<FavoriteBody, AppError> {
        let related = Self::load_related(conn, std::slice::from_ref(&favorite)).await?;
        serialize::favorite(favorite, &related)
    }
}
