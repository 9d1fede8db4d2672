// src/main.rs

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gemini_relay::api::http::http_router;
use gemini_relay::config::RelayConfig;
use gemini_relay::history::migration::run_migrations;
use gemini_relay::state::create_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if dotenvy::dotenv().is_err() {
        info!("No .env file found, using environment variables only");
    }

    // Missing GEMINI_API_KEY aborts startup here.
    let config = RelayConfig::from_env()?;
    info!("Starting Gemini relay");
    info!("Model: {}", config.model);

    // Create database pool and ensure schema
    let pool = SqlitePoolOptions::new()
        .max_connections(config.sqlite_max_connections)
        .connect(&config.database_url)
        .await?;
    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let app_state = Arc::new(create_app_state(config, pool)?);
    let app = http_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
