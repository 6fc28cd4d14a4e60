use thiserror::Error;

/// Errors raised while constructing an [`crate::OsmClient`].
#[derive(Debug, Error)]
pub enum OsmError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid OSM base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Why a node payload could not be turned into an [`ccdb_core::OsmNode`].
#[derive(Debug, Error)]
pub enum NodeParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("document contains no node element")]
    NoNodeElement,

    #[error("node element has no '{0}' attribute")]
    MissingCoordinate(&'static str),

    #[error("node attribute '{attr}' is not a finite number: '{raw}'")]
    InvalidCoordinate { attr: &'static str, raw: String },

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("document ends with {0} unclosed element(s)")]
    UnclosedElements(usize),

    #[error("document has text outside the root element")]
    TextOutsideRoot,
}

/// Internal cause behind a "node not found" outcome. Logged, never surfaced.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("empty response body")]
    EmptyBody,

    #[error("response body is not XML")]
    NotXml,

    #[error("unparsable node payload: {0}")]
    Parse(#[from] NodeParseError),
}
