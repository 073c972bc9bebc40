use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use theatre::{
    config::{Config, LogFormat},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    let (pretty, json) = match config.app.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(pretty)
        .with(json)
        .init();

    info!(environment = %config.app.environment, "Starting theatre data layer");

    let state = AppState::new(config)
        .await
        .context("Failed to initialise database")?;
    info!("Database connected and migrated");

    let halls = state.catalog.list_halls().await?;
    let plays = state.catalog.list_plays().await?;
    let performances = state.catalog.list_performances().await?;
    info!(
        halls = halls.len(),
        plays = plays.len(),
        performances = performances.len(),
        "Catalog loaded"
    );

    Ok(())
}
