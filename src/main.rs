use subdivision_desk::{
    api::{self, AppState},
    config::{database, server, subdivision},
    core::seed,
    errors::Result,
};

use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load seed data and billing rates
    let config_path = server::config_path();
    let config = subdivision::load_config(&config_path)
        .inspect_err(|e| error!("Failed to load {config_path}: {e}"))?;
    info!(
        "Loaded configuration for {} blocks from {config_path}.",
        config.blocks.len()
    );

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Seed blocks and households that are not there yet
    let created = seed::seed_subdivision(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed subdivision: {e}"))?;
    info!("Seeding complete, {created} new blocks.");

    // 6. Serve
    let address = server::bind_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| error!("Failed to bind {address}: {e}"))?;
    info!("Listening on http://{address}");

    axum::serve(listener, api::router(AppState::new(db, config.rates))).await?;

    Ok(())
}
