use super::{crud, FavoriteService};
use crate::error::AppError;
use crate::migration::USER_TABLE;
use crate::models::{DbId, NewUser, User, UserChanges};
use crate::serialize::{self, Related, UserBody};
use sqlx::{PgConnection, PgPool};

/// Password is write-only and never selected.
const COLUMNS: &str = "id, name, username";

pub struct UserService;

impl UserService {
    /// All users ordered by id, each with their favorites.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserBody>, AppError> {
        let mut tx = crud::snapshot(pool).await?;
        let sql = format!("SELECT {COLUMNS} FROM {USER_TABLE} ORDER BY id");
        tracing::debug!(sql = %sql, "query");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&mut *tx).await?;
        let ids: Vec<DbId> = users.iter().map(|u| u.id).collect();
        let favorites = FavoriteService::owned_by(&mut tx, &ids).await?;
        let related = FavoriteService::load_related(&mut tx, &favorites).await?;
        tx.commit().await?;

        let mut bodies = Vec::with_capacity(users.len());
        for user in users {
            let own = favorites.iter().filter(|f| f.user_id == user.id).cloned().collect();
            bodies.push(serialize::user(user, own, &related)?);
        }
        Ok(bodies)
    }

    pub async fn get(pool: &PgPool, id: DbId) -> Result<UserBody, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM {USER_TABLE} WHERE id = $1");
        let mut tx = crud::snapshot(pool).await?;
        tracing::debug!(sql = %sql, id, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        let body = Self::with_favorites(&mut tx, user).await?;
        tx.commit().await?;
        Ok(body)
    }

    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserBody, AppError> {
        let sql = format!(
            "INSERT INTO {USER_TABLE} (name, username, password) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.password)
            .fetch_one(pool)
            .await?;
        tracing::info!(id = user.id, username = %user.username, "user created");
        serialize::user(user, Vec::new(), &Related::default())
    }

    pub async fn update(pool: &PgPool, id: DbId, changes: &UserChanges) -> Result<UserBody, AppError> {
        let sql = format!(
            "UPDATE {USER_TABLE} SET \
                name = COALESCE($2, name), \
                username = COALESCE($3, username), \
                password = COALESCE($4, password) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.username)
            .bind(&changes.password)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        tracing::info!(id, "user updated");
        let mut tx = crud::snapshot(pool).await?;
        let body = Self::with_favorites(&mut tx, user).await?;
        tx.commit().await?;
        Ok(body)
    }

    /// Delete the user; their favorites go with them (ON DELETE CASCADE).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::delete_by_id(pool, USER_TABLE, id, "User").await
    }

    pub async fn require(pool: &PgPool, id: DbId) -> Result<(), AppError> {
        crud::require(pool, USER_TABLE, id, "User").await
    }

    async fn with_favorites(conn: &mut PgConnection, user: User) -> Result<UserBody, AppError> {
        let favorites = FavoriteService::owned_by(&mut *conn, &[user.id]).await?;
        let related = FavoriteService::load_related(conn, &favorites).await?;
        serialize::user(user, favorites, &related)
    }
}
