//! In-process [`PosStore`] backed by a mutex-guarded map.
//!
//! The name check and the insert happen under one lock, so concurrent creates
//! with the same name resolve to exactly one success.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::pos::{CandidatePos, Pos};
use crate::ports::PosStore;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    records: BTreeMap<i64, Pos>,
}

impl MemoryState {
    fn name_taken_by_other(&self, name: &str, own_id: Option<i64>) -> bool {
        self.records
            .values()
            .any(|p| p.name == name && Some(p.id) != own_id)
    }
}

#[derive(Debug, Default)]
pub struct MemoryPosStore {
    state: Mutex<MemoryState>,
}

impl MemoryPosStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl PosStore for MemoryPosStore {
    async fn upsert(&self, id: Option<i64>, pos: &CandidatePos) -> Result<Pos, StoreError> {
        let mut state = self.state.lock().await;

        if let Some(id) = id {
            if !state.records.contains_key(&id) {
                return Err(StoreError::NotFound { id });
            }
        }
        if state.name_taken_by_other(&pos.name, id) {
            return Err(StoreError::DuplicateName {
                name: pos.name.clone(),
            });
        }

        let now = Utc::now();
        let saved = match id {
            Some(id) => {
                let created_at = state
                    .records
                    .get(&id)
                    .map_or(now, |existing| existing.created_at);
                Pos::from_candidate(id, pos.clone(), created_at, now)
            }
            None => {
                state.last_id += 1;
                Pos::from_candidate(state.last_id, pos.clone(), now, now)
            }
        };
        state.records.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn get_by_id(&self, id: i64) -> Result<Pos, StoreError> {
        self.state
            .lock()
            .await
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn list(&self) -> Result<Vec<Pos>, StoreError> {
        Ok(self.state.lock().await.records.values().cloned().collect())
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut state = self.state.lock().await;
        let removed = state.records.len() as u64;
        state.records.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
