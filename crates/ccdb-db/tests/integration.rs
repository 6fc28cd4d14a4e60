//! Offline tests for ccdb-db pool configuration and row conversion.
//! These tests do not require a live database connection.

use ccdb_core::{AppConfig, CampusType, Environment, Pos, PosType};
use ccdb_db::{DbError, PoolConfig, PosRow};
use chrono::Utc;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

fn row(pos_type: &str, campus: &str) -> PosRow {
    let now = Utc::now();
    PosRow {
        id: 3,
        name: "Café Botanik".to_string(),
        description: "Imported from OpenStreetMap".to_string(),
        pos_type: pos_type.to_string(),
        campus: campus.to_string(),
        street: "Im Neuenheimer Feld".to_string(),
        house_number: "304".to_string(),
        postal_code: 69120,
        city: "Heidelberg".to_string(),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: Some("postgres://example".to_string()),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        osm_api_base_url: "https://api.openstreetmap.org/api/0.6/node/".to_string(),
        osm_user_agent: "CampusCoffee/1.0".to_string(),
        osm_request_timeout_secs: 30,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn row_converts_to_pos() {
    let pos = Pos::try_from(row("CAFETERIA", "INF")).expect("row should convert");
    assert_eq!(pos.id, 3);
    assert_eq!(pos.pos_type, PosType::Cafeteria);
    assert_eq!(pos.campus, CampusType::Inf);
    assert_eq!(pos.postal_code, 69120);
}

#[test]
fn row_with_unknown_type_is_invalid() {
    let err = Pos::try_from(row("RESTAURANT", "INF")).unwrap_err();
    assert!(matches!(err, DbError::InvalidRow(ref msg) if msg.contains("RESTAURANT")), "got: {err:?}");
}

#[test]
fn row_with_unknown_campus_is_invalid() {
    let err = Pos::try_from(row("CAFE", "MARS")).unwrap_err();
    assert!(matches!(err, DbError::InvalidRow(_)), "got: {err:?}");
}
