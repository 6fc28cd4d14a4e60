//! Integration tests for `OsmClient` using wiremock HTTP mocks.

use ccdb_core::NodeNotFound;
use ccdb_osm::{OsmClient, ACCEPT_XML};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const NODE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="openstreetmap-cgimap">
  <node id="1234567" lat="49.4122" lon="8.7101">
    <tag k="name" v="Rada Coffee &amp; Rösterei"/>
    <tag k="amenity" v="cafe"/>
  </node>
</osm>"#;

fn test_client(server: &MockServer) -> OsmClient {
    OsmClient::new(&server.uri(), "CampusCoffee/1.0", 5).expect("client construction should not fail")
}

async fn mount_response(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/1234567"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

async fn assert_not_found(server: &MockServer) {
    let err = test_client(server).fetch_node(1_234_567).await.unwrap_err();
    assert_eq!(err, NodeNotFound { node_id: 1_234_567 });
}

#[tokio::test]
async fn fetch_node_sends_identifying_headers_and_parses_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/1234567"))
        .and(header("user-agent", "CampusCoffee/1.0"))
        .and(|req: &Request| {
            req.headers
                .get("accept")
                .and_then(|v| v.to_str().ok())
                == Some(ACCEPT_XML)
        })
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/xml")
                .set_body_string(NODE_XML),
        )
        .expect(1)
        .mount(&server)
        .await;

    let node = test_client(&server)
        .fetch_node(1_234_567)
        .await
        .expect("should fetch node");

    assert_eq!(node.node_id, 1_234_567);
    assert_eq!(node.coordinates(), Some((49.4122, 8.7101)));
    assert_eq!(node.tag("name"), Some("Rada Coffee & Rösterei"));
    assert_eq!(node.tag("amenity"), Some("cafe"));
}

#[tokio::test]
async fn fetch_node_xml_returns_raw_document() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(200).set_body_string(NODE_XML)).await;

    let xml = test_client(&server)
        .fetch_node_xml(1_234_567)
        .await
        .expect("should fetch xml");
    assert!(xml.starts_with("<?xml"));
}

#[tokio::test]
async fn http_404_is_not_found() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(404)).await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn http_410_for_deleted_node_is_not_found() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(410).set_body_string("")).await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn server_error_is_not_found_without_retry() {
    let server = MockServer::start().await;
    // `expect(1)` is verified when the server drops.
    mount_response(&server, ResponseTemplate::new(503)).await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn empty_body_is_not_found() {
    let server = MockServer::start().await;
    mount_response(&server, ResponseTemplate::new(200)).await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn html_error_page_with_200_is_not_found() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_string("<!DOCTYPE html><html><body>Service unavailable</body></html>"),
    )
    .await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn malformed_xml_is_not_found() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(r#"<osm><node lat="1" lon="2"><tag k="name" v="X"></osm>"#),
    )
    .await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn trailing_junk_after_document_is_not_found() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string(
            r#"<osm><node lat="49.1" lon="8.6"><tag k="name" v="X"/></node></osm>this is not xml"#,
        ),
    )
    .await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn document_without_node_is_not_found() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200).set_body_string(r#"<?xml version="1.0"?><osm version="0.6"/>"#),
    )
    .await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn node_without_coordinates_is_not_found() {
    let server = MockServer::start().await;
    mount_response(
        &server,
        ResponseTemplate::new(200)
            .set_body_string(r#"<osm><node id="1234567"><tag k="name" v="X"/></node></osm>"#),
    )
    .await;
    assert_not_found(&server).await;
}

#[tokio::test]
async fn unreachable_host_is_not_found() {
    // Nothing listens on port 9 of the loopback interface.
    let client = OsmClient::new("http://127.0.0.1:9/node/", "CampusCoffee/1.0", 2)
        .expect("client construction should not fail");
    let err = client.fetch_node(5).await.unwrap_err();
    assert_eq!(err, NodeNotFound { node_id: 5 });
}
