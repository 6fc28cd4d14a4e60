//! POS service: CRUD delegation plus the OSM import pipeline.
//!
//! An import runs FETCH → PARSE → MAP → UPSERT as one sequential chain and
//! stops at the first failing stage. Duplicate names are detected only by the
//! store; the service never pre-checks.

use crate::campus::{CampusResolver, DefaultCampusResolver};
use crate::error::ServiceError;
use crate::mapper::map_node_to_candidate;
use crate::pos::{CandidatePos, Pos};
use crate::ports::{NodeSource, PosStore};

pub struct PosService<S, P, R = DefaultCampusResolver> {
    nodes: S,
    store: P,
    campus: R,
}

impl<S, P> PosService<S, P, DefaultCampusResolver>
where
    S: NodeSource + Sync,
    P: PosStore + Sync,
{
    pub fn new(nodes: S, store: P) -> Self {
        Self::with_campus_resolver(nodes, store, DefaultCampusResolver)
    }
}

impl<S, P, R> PosService<S, P, R>
where
    S: NodeSource + Sync,
    P: PosStore + Sync,
    R: CampusResolver + Sync,
{
    pub fn with_campus_resolver(nodes: S, store: P, campus: R) -> Self {
        Self {
            nodes,
            store,
            campus,
        }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the store fails.
    pub async fn list_pos(&self) -> Result<Vec<Pos>, ServiceError> {
        tracing::debug!("retrieving all POS");
        Ok(self.store.list().await?)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError::PosNotFound`] if no record has `id`.
    pub async fn get_pos(&self, id: i64) -> Result<Pos, ServiceError> {
        tracing::debug!(id, "retrieving POS");
        self.store.get_by_id(id).await.map_err(|e| {
            let err = ServiceError::from(e);
            tracing::error!(id, error = %err, "failed to retrieve POS");
            err
        })
    }

    /// Removes every POS and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] if the store fails.
    pub async fn clear_pos(&self) -> Result<u64, ServiceError> {
        tracing::warn!("clearing all POS data");
        Ok(self.store.clear().await?)
    }

    /// Creates (`id = None`) or updates a POS.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::DuplicatePosName`] when the name is already taken.
    /// - [`ServiceError::PosNotFound`] when updating an unknown ID.
    pub async fn upsert_pos(
        &self,
        id: Option<i64>,
        pos: &CandidatePos,
    ) -> Result<Pos, ServiceError> {
        match id {
            None => tracing::info!(name = %pos.name, "creating new POS"),
            Some(id) => tracing::info!(id, name = %pos.name, "updating POS"),
        }

        match self.store.upsert(id, pos).await {
            Ok(saved) => {
                tracing::info!(id = saved.id, name = %saved.name, "upserted POS");
                Ok(saved)
            }
            Err(e) => {
                let err = ServiceError::from(e);
                tracing::error!(name = %pos.name, error = %err, "failed to upsert POS");
                Err(err)
            }
        }
    }

    /// Fetches and maps an OSM node without persisting anything.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::OsmNodeNotFound`] when the node cannot be fetched or parsed.
    /// - [`ServiceError::OsmNodeMissingFields`] when required tags are absent or invalid.
    pub async fn preview_osm_node(&self, node_id: u64) -> Result<CandidatePos, ServiceError> {
        let node = self.nodes.fetch_node(node_id).await.map_err(|e| {
            tracing::error!(node_id, error = %e, "OSM node could not be fetched");
            ServiceError::from(e)
        })?;

        // Report the requested ID even if the source stamped another one.
        let candidate = map_node_to_candidate(&node, &self.campus).map_err(|e| {
            tracing::error!(node_id, error = %e, "OSM node cannot be mapped to a POS");
            ServiceError::OsmNodeMissingFields { node_id }
        })?;

        Ok(candidate)
    }

    /// Imports a POS from an OSM node and persists it as a new record.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::OsmNodeNotFound`] when the node cannot be fetched or parsed.
    /// - [`ServiceError::OsmNodeMissingFields`] when required tags are absent or invalid.
    /// - [`ServiceError::DuplicatePosName`] when a POS with the derived name exists.
    pub async fn import_from_osm_node(&self, node_id: u64) -> Result<Pos, ServiceError> {
        tracing::info!(node_id, "importing POS from OpenStreetMap node");

        let candidate = self.preview_osm_node(node_id).await?;
        let saved = self.upsert_pos(None, &candidate).await.map_err(|e| {
            tracing::error!(node_id, name = %candidate.name, error = %e, "OSM import was not persisted");
            e
        })?;

        tracing::info!(node_id, id = saved.id, name = %saved.name, "imported POS from OSM node");
        Ok(saved)
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
