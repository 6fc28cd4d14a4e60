//! [`PosStore`] backed by Postgres.

use ccdb_core::{CandidatePos, Pos, PosStore, StoreError};
use sqlx::PgPool;

use crate::pos::{clear_pos, get_pos_by_id, insert_pos, list_pos, update_pos};
use crate::{ping, DbError};

#[derive(Debug, Clone)]
pub struct PgPosStore {
    pool: PgPool,
}

impl PgPosStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl PosStore for PgPosStore {
    async fn upsert(&self, id: Option<i64>, pos: &CandidatePos) -> Result<Pos, StoreError> {
        let row = match id {
            None => insert_pos(&self.pool, pos).await,
            Some(id) => update_pos(&self.pool, id, pos).await,
        }
        .map_err(|e| to_store_error(e, id))?;

        Pos::try_from(row).map_err(|e| to_store_error(e, id))
    }

    async fn get_by_id(&self, id: i64) -> Result<Pos, StoreError> {
        let row = get_pos_by_id(&self.pool, id)
            .await
            .map_err(|e| to_store_error(e, Some(id)))?
            .ok_or(StoreError::NotFound { id })?;

        Pos::try_from(row).map_err(|e| to_store_error(e, Some(id)))
    }

    async fn list(&self) -> Result<Vec<Pos>, StoreError> {
        list_pos(&self.pool)
            .await
            .map_err(|e| to_store_error(e, None))?
            .into_iter()
            .map(|row| Pos::try_from(row).map_err(|e| to_store_error(e, None)))
            .collect()
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        clear_pos(&self.pool)
            .await
            .map_err(|e| to_store_error(e, None))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        ping(&self.pool)
            .await
            .map_err(|e| to_store_error(DbError::from(e), None))
    }
}

fn to_store_error(err: DbError, id: Option<i64>) -> StoreError {
    match (err, id) {
        (DbError::NotFound, Some(id)) => StoreError::NotFound { id },
        (DbError::DuplicateName { name }, _) => StoreError::DuplicateName { name },
        (other, _) => StoreError::Backend(Box::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_requested_id() {
        let err = to_store_error(DbError::NotFound, Some(12));
        assert!(matches!(err, StoreError::NotFound { id: 12 }), "got: {err:?}");
    }

    #[test]
    fn duplicate_name_is_preserved() {
        let err = to_store_error(
            DbError::DuplicateName {
                name: "Café Botanik".to_string(),
            },
            None,
        );
        assert!(
            matches!(err, StoreError::DuplicateName { ref name } if name == "Café Botanik"),
            "got: {err:?}"
        );
    }

    #[test]
    fn other_failures_become_backend_errors() {
        let err = to_store_error(DbError::InvalidRow("pos 1: unknown".to_string()), Some(1));
        assert!(matches!(err, StoreError::Backend(_)), "got: {err:?}");

        let err = to_store_error(DbError::NotFound, None);
        assert!(matches!(err, StoreError::Backend(_)), "got: {err:?}");
    }
}
