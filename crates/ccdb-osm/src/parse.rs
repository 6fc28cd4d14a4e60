//! Parser for the OSM API node document.
//!
//! The expected shape is `<osm><node lat=".." lon=".."><tag k=".." v=".."/>…</node></osm>`.
//! Only the first `node` element is read, wherever it sits; its direct `tag`
//! children become the tag map. The whole document is still read to the end:
//! a second root, text outside the root and undefined entities are rejected.

use ccdb_core::OsmNode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::NodeParseError;

/// Parse a node document, stamping the result with the requested `node_id`.
///
/// # Errors
///
/// Returns [`NodeParseError`] for malformed XML (including stray text around
/// the root and undefined entities), a missing `node` element, or absent or
/// non-numeric `lat`/`lon` attributes.
pub fn parse_node_xml(xml: &str, node_id: u64) -> Result<OsmNode, NodeParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut scan = NodeScan::new(node_id);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
                scan.open(&e, depth)?;
            }
            Event::Empty(e) => {
                if depth == 0 {
                    roots += 1;
                }
                scan.open(&e, depth + 1)?;
                scan.close(depth + 1);
            }
            Event::End(_) => {
                scan.close(depth);
                depth = depth.saturating_sub(1);
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                if depth == 0 && !text.trim().is_empty() {
                    return Err(NodeParseError::TextOutsideRoot);
                }
            }
            Event::CData(_) if depth == 0 => return Err(NodeParseError::TextOutsideRoot),
            Event::Eof => break,
            _ => {}
        }
        if roots > 1 {
            return Err(NodeParseError::MultipleRoots);
        }
    }

    if depth > 0 {
        return Err(NodeParseError::UnclosedElements(depth));
    }
    scan.node.ok_or(NodeParseError::NoNodeElement)
}

/// Tracks the first node element and collects its tags.
struct NodeScan {
    node_id: u64,
    node: Option<OsmNode>,
    /// Depth of the node element while it is open.
    open_at: Option<usize>,
}

impl NodeScan {
    fn new(node_id: u64) -> Self {
        Self {
            node_id,
            node: None,
            open_at: None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>, depth: usize) -> Result<(), NodeParseError> {
        match e.name().as_ref() {
            b"node" if self.node.is_none() => {
                self.node = Some(read_node(e, self.node_id)?);
                self.open_at = Some(depth);
            }
            b"tag" if self.open_at.is_some_and(|d| depth == d + 1) => {
                let (key, value) = read_tag(e)?;
                if let Some(node) = self.node.as_mut() {
                    node.tags.insert(key, value);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn close(&mut self, depth: usize) {
        if self.open_at == Some(depth) {
            self.open_at = None;
        }
    }
}

fn read_node(e: &BytesStart<'_>, node_id: u64) -> Result<OsmNode, NodeParseError> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"lat" => lat = Some(parse_coordinate("lat", &attr.unescape_value()?)?),
            b"lon" => lon = Some(parse_coordinate("lon", &attr.unescape_value()?)?),
            _ => {}
        }
    }

    let mut node = OsmNode::new(node_id);
    node.lat = Some(lat.ok_or(NodeParseError::MissingCoordinate("lat"))?);
    node.lon = Some(lon.ok_or(NodeParseError::MissingCoordinate("lon"))?);
    Ok(node)
}

/// A `tag` element missing `k` or `v` contributes an empty string for it.
fn read_tag(e: &BytesStart<'_>) -> Result<(String, String), NodeParseError> {
    let mut key = String::new();
    let mut value = String::new();

    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"k" => key = attr.unescape_value()?.into_owned(),
            b"v" => value = attr.unescape_value()?.into_owned(),
            _ => {}
        }
    }
    Ok((key, value))
}

fn parse_coordinate(attr: &'static str, raw: &str) -> Result<f64, NodeParseError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| NodeParseError::InvalidCoordinate {
            attr,
            raw: raw.to_string(),
        })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
