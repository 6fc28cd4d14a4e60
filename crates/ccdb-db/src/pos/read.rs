//! Read operations for the `pos` table.

use sqlx::PgPool;

use super::types::{PosRow, POS_COLUMNS};
use crate::DbError;

/// Returns a single POS by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_pos_by_id(pool: &PgPool, id: i64) -> Result<Option<PosRow>, DbError> {
    let row = sqlx::query_as::<_, PosRow>(&format!("SELECT {POS_COLUMNS} FROM pos WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Returns all POS ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_pos(pool: &PgPool) -> Result<Vec<PosRow>, DbError> {
    let rows = sqlx::query_as::<_, PosRow>(&format!("SELECT {POS_COLUMNS} FROM pos ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
