//! Campus assignment for imported nodes.
//!
//! Imports always land in [`DEFAULT_CAMPUS`] today. Coordinate-based assignment
//! plugs in by implementing [`CampusResolver`]; the mapper does not change.

use crate::osm::OsmNode;
use crate::pos::CampusType;

pub const DEFAULT_CAMPUS: CampusType = CampusType::Altstadt;

pub trait CampusResolver {
    fn resolve(&self, node: &OsmNode) -> CampusType;
}

/// Assigns every node to [`DEFAULT_CAMPUS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCampusResolver;

impl CampusResolver for DefaultCampusResolver {
    fn resolve(&self, node: &OsmNode) -> CampusType {
        if let Some((lat, lon)) = node.coordinates() {
            tracing::debug!(
                node_id = node.node_id,
                lat,
                lon,
                campus = %DEFAULT_CAMPUS,
                "coordinates present but not used for campus assignment"
            );
        }
        DEFAULT_CAMPUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolver_ignores_coordinates() {
        let mut node = OsmNode::new(1);
        assert_eq!(DefaultCampusResolver.resolve(&node), CampusType::Altstadt);

        // Bergheim coordinates still resolve to the default region.
        node.lat = Some(49.4093);
        node.lon = Some(8.6894);
        assert_eq!(DefaultCampusResolver.resolve(&node), CampusType::Altstadt);
    }
}
