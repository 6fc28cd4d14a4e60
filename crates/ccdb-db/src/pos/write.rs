//! Write operations for the `pos` table.
//!
//! Name uniqueness is enforced by the `pos_name_key` constraint; a violation
//! surfaces as [`DbError::DuplicateName`].

use ccdb_core::CandidatePos;
use sqlx::PgPool;

use super::types::{PosRow, POS_COLUMNS};
use crate::DbError;

const UNIQUE_VIOLATION: &str = "23505";

/// Insert a new POS and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::DuplicateName`] if the name is taken, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn insert_pos(pool: &PgPool, pos: &CandidatePos) -> Result<PosRow, DbError> {
    sqlx::query_as::<_, PosRow>(&format!(
        "INSERT INTO pos \
             (name, description, pos_type, campus, street, house_number, postal_code, city) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING {POS_COLUMNS}"
    ))
    .bind(&pos.name)
    .bind(&pos.description)
    .bind(pos.pos_type.as_str())
    .bind(pos.campus.as_str())
    .bind(&pos.street)
    .bind(&pos.house_number)
    .bind(pos.postal_code)
    .bind(&pos.city)
    .fetch_one(pool)
    .await
    .map_err(|e| map_unique_violation(e, &pos.name))
}

/// Overwrite every field of an existing POS, keeping `created_at`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has `id`,
/// [`DbError::DuplicateName`] if another row already has the name, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn update_pos(pool: &PgPool, id: i64, pos: &CandidatePos) -> Result<PosRow, DbError> {
    sqlx::query_as::<_, PosRow>(&format!(
        "UPDATE pos \
         SET name = $2, description = $3, pos_type = $4, campus = $5, street = $6, \
             house_number = $7, postal_code = $8, city = $9, updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {POS_COLUMNS}"
    ))
    .bind(id)
    .bind(&pos.name)
    .bind(&pos.description)
    .bind(pos.pos_type.as_str())
    .bind(pos.campus.as_str())
    .bind(&pos.street)
    .bind(&pos.house_number)
    .bind(pos.postal_code)
    .bind(&pos.city)
    .fetch_optional(pool)
    .await
    .map_err(|e| map_unique_violation(e, &pos.name))?
    .ok_or(DbError::NotFound)
}

/// Delete every POS, returning the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn clear_pos(pool: &PgPool) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM pos").execute(pool).await?;
    tracing::info!(deleted = result.rows_affected(), "cleared pos table");
    Ok(result.rows_affected())
}

fn map_unique_violation(e: sqlx::Error, name: &str) -> DbError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            tracing::debug!(name, "pos name already taken");
            return DbError::DuplicateName {
                name: name.to_string(),
            };
        }
    }
    DbError::Sqlx(e)
}
