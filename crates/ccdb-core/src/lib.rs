pub mod app_config;
pub mod campus;
pub mod config;
pub mod error;
pub mod mapper;
pub mod memory;
pub mod osm;
pub mod ports;
pub mod pos;
pub mod service;

pub use app_config::{AppConfig, Environment};
pub use campus::{CampusResolver, DefaultCampusResolver, DEFAULT_CAMPUS};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, MappingError, NodeNotFound, ServiceError, StoreError};
pub use mapper::map_node_to_candidate;
pub use memory::MemoryPosStore;
pub use osm::OsmNode;
pub use ports::{NodeSource, PosStore};
pub use pos::{CampusType, CandidatePos, Pos, PosType};
pub use service::PosService;
