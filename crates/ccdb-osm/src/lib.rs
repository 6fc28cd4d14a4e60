//! OpenStreetMap node access: an HTTP fetcher for the node endpoint and a
//! parser for its XML payload.

pub mod client;
pub mod error;
pub mod parse;

pub use client::{OsmClient, ACCEPT_XML};
pub use error::{FetchFailure, NodeParseError, OsmError};
pub use parse::parse_node_xml;
