//! linkstrat-ui - LinkedIn strategy generation service
//!
//! Hosts the onboarding wizard, the staged strategy generation pipeline,
//! and the stateless generation endpoints on a single local port.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use linkstrat_ui::AppState;

const LISTEN_ADDR: &str = "127.0.0.1:5740";

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting linkstrat-ui");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let root_folder = linkstrat_common::config::resolve_root_folder();
    let db_path = linkstrat_common::config::prepare_root_folder(&root_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;
    info!("Database: {}", db_path.display());

    let db_pool = linkstrat_common::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    let state = AppState::new(db_pool);
    let app = linkstrat_ui::build_router(state);

    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR).await?;
    info!("Listening on http://{}", LISTEN_ADDR);
    info!("Health check: http://{}/health", LISTEN_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
