pub mod config;
pub mod database;
pub mod error;
pub mod media;
pub mod models;
pub mod repositories;
pub mod services;
pub mod types;

use std::sync::Arc;

use services::{BookingService, CatalogService};

// Shared state for everything built on top of the data layer
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub config: config::Config,
    pub catalog: CatalogService,
    pub booking: BookingService,
}

impl AppState {
    /// Connect to the database, bring the schema up to date and wire the
    /// services onto the shared pool.
    pub async fn new(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database).await?;

        db.run_migrations().await?;

        Ok(Arc::new(Self::with_database(db, config)))
    }

    /// Build the state around an existing database handle without touching
    /// the schema.
    pub fn with_database(db: database::Database, config: config::Config) -> Self {
        let catalog = CatalogService::new(db.clone(), &config.media);
        let booking = BookingService::new(db.clone());
        Self {
            db,
            config,
            catalog,
            booking,
        }
    }
}
