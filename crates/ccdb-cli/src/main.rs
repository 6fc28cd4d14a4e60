mod pos;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::pos::PgService;

#[derive(Debug, Parser)]
#[command(name = "ccdb-cli")]
#[command(about = "Campus coffee POS command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a POS from an OpenStreetMap node
    Import {
        /// OSM node ID
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        node_id: u64,
        /// Fetch and map the node without writing to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// List all POS
    List,
    /// Show a single POS
    Get {
        /// POS ID
        id: i64,
    },
    /// Delete every POS
    Clear,
    /// Run pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ccdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("ccdb-cli ready; run with --help for commands");
        return Ok(());
    };

    if let Commands::Import {
        node_id,
        dry_run: true,
    } = command
    {
        return pos::run_import_dry_run(&config, node_id).await;
    }

    let pool_config = ccdb_db::PoolConfig::from_app_config(&config);
    let pool = ccdb_db::connect_pool(config.require_database_url()?, pool_config).await?;

    if matches!(command, Commands::Migrate) {
        let applied = ccdb_db::run_migrations(&pool).await?;
        println!("applied {applied} migration(s)");
        return Ok(());
    }

    let service = PgService::new(
        ccdb_osm::OsmClient::from_config(&config)?,
        ccdb_db::PgPosStore::new(pool),
    );

    match command {
        Commands::Import { node_id, .. } => pos::run_import(&service, node_id).await,
        Commands::List => pos::run_list(&service).await,
        Commands::Get { id } => pos::run_get(&service, id).await,
        Commands::Clear => pos::run_clear(&service).await,
        Commands::Migrate => Ok(()),
    }
}
