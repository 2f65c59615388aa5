//! gridbeat-api - Step sequencer backend service
//!
//! Serves the session/instrument/sample API and the uploaded sample files.

use anyhow::Result;
use clap::Parser;
use gridbeat_api::AppState;
use gridbeat_common::config::{resolve_root_folder, Config};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gridbeat-api", about = "Gridbeat step sequencer backend")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "GRIDBEAT_PORT", default_value_t = 3000)]
    port: u16,

    /// Root folder holding the database and static files
    #[arg(long, env = "GRIDBEAT_ROOT")]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting gridbeat-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), "GRIDBEAT_ROOT");
    let config = Config::new(root_folder);
    config.ensure_directories()?;
    info!("Root folder: {}", config.root_folder.display());

    let db_path = config.database_path();
    info!("Database: {}", db_path.display());
    let pool = gridbeat_common::db::init_database(&db_path).await?;

    let state = AppState::new(pool, config.static_dir(), config.sample_dir());
    let app = gridbeat_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!("Listening on http://0.0.0.0:{}", args.port);
    info!("Health check: http://0.0.0.0:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
