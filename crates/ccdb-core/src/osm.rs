use std::collections::HashMap;

/// A single OpenStreetMap node as read from the remote API.
///
/// `node_id` is always the ID that was requested, whatever the payload says.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    pub node_id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: HashMap<String, String>,
}

impl OsmNode {
    #[must_use]
    pub fn new(node_id: u64) -> Self {
        Self {
            node_id,
            lat: None,
            lon: None,
            tags: HashMap::new(),
        }
    }

    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Returns the tag value only when it contains something other than whitespace.
    #[must_use]
    pub fn non_blank_tag(&self, key: &str) -> Option<&str> {
        self.tag(key).filter(|v| !v.trim().is_empty())
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_tag_filters_whitespace_values() {
        let mut node = OsmNode::new(7);
        node.tags.insert("name".to_string(), "   ".to_string());
        node.tags.insert("website".to_string(), "https://x.example".to_string());

        assert_eq!(node.tag("name"), Some("   "));
        assert_eq!(node.non_blank_tag("name"), None);
        assert_eq!(node.non_blank_tag("website"), Some("https://x.example"));
        assert_eq!(node.non_blank_tag("missing"), None);
    }

    #[test]
    fn coordinates_require_both_axes() {
        let mut node = OsmNode::new(7);
        node.lat = Some(49.41);
        assert_eq!(node.coordinates(), None);
        node.lon = Some(8.69);
        assert_eq!(node.coordinates(), Some((49.41, 8.69)));
    }
}
