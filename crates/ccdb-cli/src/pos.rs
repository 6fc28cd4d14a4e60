//! POS command handlers. Every handler prints pretty JSON to stdout.

use ccdb_core::{AppConfig, MemoryPosStore, PosService};
use ccdb_db::PgPosStore;
use ccdb_osm::OsmClient;
use serde::Serialize;

pub(crate) type PgService = PosService<OsmClient, PgPosStore>;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Import a node and print the stored POS.
///
/// # Errors
///
/// Returns an error if the node is unknown, incomplete, or its name is taken.
pub(crate) async fn run_import(service: &PgService, node_id: u64) -> anyhow::Result<()> {
    let saved = service.import_from_osm_node(node_id).await?;
    tracing::info!(node_id, pos_id = saved.id, name = %saved.name, "imported OSM node");
    print_json(&saved)
}

/// Fetch and map a node, printing the candidate without connecting to the database.
///
/// # Errors
///
/// Returns an error if the node is unknown or incomplete.
pub(crate) async fn run_import_dry_run(config: &AppConfig, node_id: u64) -> anyhow::Result<()> {
    let service = PosService::new(OsmClient::from_config(config)?, MemoryPosStore::new());
    let candidate = service.preview_osm_node(node_id).await?;
    eprintln!("dry run: POS for OSM node {node_id} was not saved");
    print_json(&candidate)
}

/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list(service: &PgService) -> anyhow::Result<()> {
    let all = service.list_pos().await?;
    if all.is_empty() {
        eprintln!("no POS found; run `import <NODE_ID>` first");
    }
    print_json(&all)
}

/// # Errors
///
/// Returns an error if no POS has `id` or the query fails.
pub(crate) async fn run_get(service: &PgService, id: i64) -> anyhow::Result<()> {
    let pos = service.get_pos(id).await?;
    print_json(&pos)
}

/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_clear(service: &PgService) -> anyhow::Result<()> {
    let deleted = service.clear_pos().await?;
    print_json(&serde_json::json!({ "deleted": deleted }))
}
