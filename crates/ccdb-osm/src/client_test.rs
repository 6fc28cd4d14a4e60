use super::*;

fn test_client(base_url: &str) -> OsmClient {
    OsmClient::new(base_url, "CampusCoffee/1.0", 30).expect("client construction should not fail")
}

#[test]
fn node_url_appends_id_to_base_with_trailing_slash() {
    let client = test_client("https://api.openstreetmap.org/api/0.6/node/");
    assert_eq!(
        client.node_url(1_234_567).as_str(),
        "https://api.openstreetmap.org/api/0.6/node/1234567"
    );
}

#[test]
fn node_url_appends_id_to_base_without_trailing_slash() {
    let client = test_client("https://api.openstreetmap.org/api/0.6/node");
    assert_eq!(
        client.node_url(42).as_str(),
        "https://api.openstreetmap.org/api/0.6/node/42"
    );
}

#[test]
fn node_url_on_bare_host() {
    let client = test_client("http://127.0.0.1:8080");
    assert_eq!(client.node_url(7).as_str(), "http://127.0.0.1:8080/7");
}

#[test]
fn rejects_unparsable_base_url() {
    let err = OsmClient::new("not a url", "ua", 30).unwrap_err();
    assert!(matches!(err, OsmError::InvalidBaseUrl { .. }), "got: {err:?}");
}

#[test]
fn rejects_non_http_scheme() {
    let err = OsmClient::new("ftp://example.org/node/", "ua", 30).unwrap_err();
    assert!(
        matches!(err, OsmError::InvalidBaseUrl { ref reason, .. } if reason.contains("ftp")),
        "got: {err:?}"
    );
}

#[test]
fn xml_shape_check() {
    assert!(looks_like_xml("<?xml version=\"1.0\"?><osm/>"));
    assert!(looks_like_xml("\n  <osm version=\"0.6\"></osm>"));
    assert!(looks_like_xml("\u{feff}<?xml version=\"1.0\"?>"));
    assert!(!looks_like_xml("<!DOCTYPE html><html></html>"));
    assert!(!looks_like_xml("<html><body>error</body></html>"));
    assert!(!looks_like_xml("{\"error\": \"not found\"}"));
}
