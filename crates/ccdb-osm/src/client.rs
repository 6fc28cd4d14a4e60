//! HTTP client for the OpenStreetMap node endpoint.
//!
//! Every way a lookup can go wrong (transport failure, non-2xx status, empty
//! or non-XML body, unparsable payload) is logged with its cause and then
//! reported as a single [`NodeNotFound`]. There is no retry and no caching.

use std::time::Duration;

use ccdb_core::{AppConfig, NodeNotFound, NodeSource, OsmNode};
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};

use crate::error::{FetchFailure, OsmError};
use crate::parse::parse_node_xml;

/// `Accept` header sent with every node request.
pub const ACCEPT_XML: &str = "application/xml, text/xml, */*";

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client for `GET <base>/<node_id>` against the OSM API.
///
/// Use [`OsmClient::from_config`] in binaries or [`OsmClient::new`] to point
/// at a mock server in tests.
#[derive(Debug, Clone)]
pub struct OsmClient {
    client: Client,
    base_url: Url,
}

impl OsmClient {
    /// # Errors
    ///
    /// Returns [`OsmError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// `http`/`https` URL, or [`OsmError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, user_agent: &str, timeout_secs: u64) -> Result<Self, OsmError> {
        let invalid = |reason: String| OsmError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(CONNECT_TIMEOUT_SECS)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// # Errors
    ///
    /// See [`OsmClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, OsmError> {
        Self::new(
            &config.osm_api_base_url,
            &config.osm_user_agent,
            config.osm_request_timeout_secs,
        )
    }

    /// Appends the node ID as the last path segment of the base URL.
    #[must_use]
    pub fn node_url(&self, node_id: u64) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&node_id.to_string());
        }
        url
    }

    /// Fetches the raw node document.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchFailure`] naming why the body is unusable.
    pub async fn fetch_node_xml(&self, node_id: u64) -> Result<String, FetchFailure> {
        let url = self.node_url(node_id);
        tracing::debug!(node_id, %url, "fetching OSM node");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_XML)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FetchFailure::EmptyBody);
        }
        if !looks_like_xml(&body) {
            return Err(FetchFailure::NotXml);
        }
        Ok(body)
    }

    /// Fetches and parses a node.
    ///
    /// # Errors
    ///
    /// Returns [`NodeNotFound`] for every failure; the cause is only logged.
    pub async fn fetch_node(&self, node_id: u64) -> Result<OsmNode, NodeNotFound> {
        match self.try_fetch_node(node_id).await {
            Ok(node) => {
                tracing::debug!(node_id, tags = node.tags.len(), "parsed OSM node");
                Ok(node)
            }
            Err(cause) => {
                tracing::error!(node_id, %cause, "OSM node not found");
                Err(NodeNotFound { node_id })
            }
        }
    }

    async fn try_fetch_node(&self, node_id: u64) -> Result<OsmNode, FetchFailure> {
        let xml = self.fetch_node_xml(node_id).await?;
        Ok(parse_node_xml(&xml, node_id)?)
    }
}

impl NodeSource for OsmClient {
    async fn fetch_node(&self, node_id: u64) -> Result<OsmNode, NodeNotFound> {
        OsmClient::fetch_node(self, node_id).await
    }
}

/// Guards against HTML error pages served with a success status.
fn looks_like_xml(body: &str) -> bool {
    let head = body.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<?xml") || head.starts_with("<osm")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
