//! Statements shared by every table: existence checks and delete by id.

use crate::error::AppError;
use crate::models::DbId;
use sqlx::{Executor, PgPool, Postgres, Transaction};

/// Read-only transaction at REPEATABLE READ. Every statement run on it sees the same snapshot,
/// so rows loaded in separate queries stay consistent with each other.
pub(crate) async fn snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// True when `table` has a row with this id.
pub(crate) async fn exists<'e, E>(executor: E, table: &str, id: DbId) -> Result<bool, AppError>
where
    E: Executor<'e, Database = Postgres>,
{
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
    tracing::debug!(sql = %sql, id, "query");
    let found: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(executor).await?;
    Ok(found)
}

/// Fail with `NotFound(kind)` unless the row exists.
pub(crate) async fn require(
    pool: &PgPool,
    table: &str,
    id: DbId,
    kind: &'static str,
) -> Result<(), AppError> {
    if exists(pool, table, id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(kind))
    }
}

/// Delete one row by id. Fails with `NotFound(kind)` when nothing was deleted.
pub(crate) async fn delete_by_id(
    pool: &PgPool,
    table: &str,
    id: DbId,
    kind: &'static str,
) -> Result<(), AppError> {
    let sql = format!("DELETE FROM {} WHERE id = $1", table);
    tracing::debug!(sql = %sql, id, "query");
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(kind));
    }
    tracing::info!(table, id, "deleted");
    Ok(())
}
