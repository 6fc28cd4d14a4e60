//! Seams between the POS service and its collaborators.

use std::future::Future;

use crate::error::{NodeNotFound, StoreError};
use crate::osm::OsmNode;
use crate::pos::{CandidatePos, Pos};

/// Supplies structured OSM nodes by ID.
pub trait NodeSource {
    fn fetch_node(&self, node_id: u64) -> impl Future<Output = Result<OsmNode, NodeNotFound>> + Send;
}

/// Create-or-update persistence for POS records, keyed by identity presence.
///
/// Name uniqueness is enforced here and nowhere else.
pub trait PosStore {
    /// `id = None` creates, `Some` updates an existing record.
    ///
    /// Fails with [`StoreError::DuplicateName`] when another record already
    /// carries the name, and [`StoreError::NotFound`] when updating an ID
    /// that does not exist.
    fn upsert(
        &self,
        id: Option<i64>,
        pos: &CandidatePos,
    ) -> impl Future<Output = Result<Pos, StoreError>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Pos, StoreError>> + Send;

    /// All records ordered by ID.
    fn list(&self) -> impl Future<Output = Result<Vec<Pos>, StoreError>> + Send;

    /// Removes every record, returning how many were removed.
    fn clear(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
