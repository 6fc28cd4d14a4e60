use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// The remote source could not supply usable markup for a node.
///
/// Transport failures, non-2xx statuses, empty or non-XML bodies and parse
/// failures all collapse into this one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("OSM node {node_id} not found")]
pub struct NodeNotFound {
    pub node_id: u64,
}

/// Why a node could not be mapped onto a POS. Only used for diagnostics; every
/// variant surfaces as the same "missing required fields" outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    Missing(&'static str),
    InvalidPostalCode(String),
}

impl std::fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldProblem::Missing(tag) => write!(f, "missing required '{tag}' tag"),
            FieldProblem::InvalidPostalCode(raw) => write!(f, "invalid postal code '{raw}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("OSM node {node_id} is missing required fields ({problem})")]
pub struct MappingError {
    pub node_id: u64,
    pub problem: FieldProblem,
}

/// Errors raised by a [`crate::ports::PosStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("POS {id} not found")]
    NotFound { id: i64 },

    #[error("a POS named '{name}' already exists")]
    DuplicateName { name: String },

    #[error("storage backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Outcomes reported by [`crate::service::PosService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("OSM node {node_id} not found")]
    OsmNodeNotFound { node_id: u64 },

    #[error("OSM node {node_id} is missing required fields")]
    OsmNodeMissingFields { node_id: u64 },

    #[error("a POS named '{name}' already exists")]
    DuplicatePosName { name: String },

    #[error("POS {id} not found")]
    PosNotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => ServiceError::PosNotFound { id },
            StoreError::DuplicateName { name } => ServiceError::DuplicatePosName { name },
            other @ StoreError::Backend(_) => ServiceError::Storage(other),
        }
    }
}

impl From<NodeNotFound> for ServiceError {
    fn from(err: NodeNotFound) -> Self {
        ServiceError::OsmNodeNotFound {
            node_id: err.node_id,
        }
    }
}

impl From<MappingError> for ServiceError {
    fn from(err: MappingError) -> Self {
        ServiceError::OsmNodeMissingFields {
            node_id: err.node_id,
        }
    }
}
